use groovy_classfile::{
    parse_field_descriptor, parse_method_descriptor, parse_type_parameter_names, ClassFile,
    FieldType, MethodDescriptor, ACC_ANNOTATION, ACC_BRIDGE, ACC_ENUM, ACC_INTERFACE, ACC_STATIC,
    ACC_SYNTHETIC,
};
use groovy_core::internal_to_binary;

use crate::ClasspathError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldStub {
    pub name: String,
    pub ty: FieldType,
    pub access_flags: u16,
}

impl FieldStub {
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.access_flags & ACC_STATIC != 0
    }

    #[must_use]
    pub fn is_enum_constant(&self) -> bool {
        self.access_flags & ACC_ENUM != 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodStub {
    pub name: String,
    pub descriptor: MethodDescriptor,
    pub access_flags: u16,
}

impl MethodStub {
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.access_flags & ACC_STATIC != 0
    }
}

/// The parts of a classfile the resolution engine consumes, with names in binary form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassStub {
    pub binary_name: String,
    pub access_flags: u16,
    pub super_binary_name: Option<String>,
    pub interfaces: Vec<String>,
    pub type_parameters: Vec<String>,
    pub fields: Vec<FieldStub>,
    /// Constructors, static initialisers, bridges and synthetic methods are dropped.
    pub methods: Vec<MethodStub>,
}

impl ClassStub {
    pub fn from_classfile(class: ClassFile) -> Result<Self, ClasspathError> {
        let binary_name = internal_to_binary(&class.this_class);
        let wrap = |source| ClasspathError::ClassFile {
            class: binary_name.clone(),
            source,
        };

        let type_parameters = match class.signature.as_deref() {
            Some(sig) => parse_type_parameter_names(sig).map_err(wrap)?,
            None => Vec::new(),
        };

        let fields = class
            .fields
            .iter()
            .filter(|f| f.access_flags & ACC_SYNTHETIC == 0)
            .map(|f| {
                Ok(FieldStub {
                    name: f.name.clone(),
                    ty: parse_field_descriptor(&f.descriptor).map_err(wrap)?,
                    access_flags: f.access_flags,
                })
            })
            .collect::<Result<Vec<_>, ClasspathError>>()?;

        let methods = class
            .methods
            .iter()
            .filter(|m| !m.name.starts_with('<'))
            .filter(|m| m.access_flags & (ACC_SYNTHETIC | ACC_BRIDGE) == 0)
            .map(|m| {
                Ok(MethodStub {
                    name: m.name.clone(),
                    descriptor: parse_method_descriptor(&m.descriptor).map_err(wrap)?,
                    access_flags: m.access_flags,
                })
            })
            .collect::<Result<Vec<_>, ClasspathError>>()?;

        Ok(ClassStub {
            access_flags: class.access_flags,
            super_binary_name: class.super_class.as_deref().map(internal_to_binary),
            interfaces: class
                .interfaces
                .iter()
                .map(|i| internal_to_binary(i))
                .collect(),
            type_parameters,
            fields,
            methods,
            binary_name,
        })
    }

    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.access_flags & ACC_INTERFACE != 0 && self.access_flags & ACC_ANNOTATION == 0
    }

    #[must_use]
    pub fn is_annotation(&self) -> bool {
        self.access_flags & ACC_ANNOTATION != 0
    }

    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.access_flags & ACC_ENUM != 0
    }
}
