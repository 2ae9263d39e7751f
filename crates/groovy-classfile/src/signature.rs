//! Generic signatures are only inspected for their formal type parameter names; bounds and type
//! arguments are skipped.

use crate::error::{Error, Result};

/// Names of the formal type parameters of a class or method signature.
///
/// `<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/util/AbstractMap<TK;TV;>;` yields `K, V`.
pub fn parse_type_parameter_names(signature: &str) -> Result<Vec<String>> {
    let err = || Error::InvalidSignature(signature.to_string());
    let Some(mut rest) = signature.strip_prefix('<') else {
        return Ok(Vec::new());
    };

    let mut names = Vec::new();
    loop {
        if let Some(after) = rest.strip_prefix('>') {
            if names.is_empty() || after.is_empty() {
                return Err(err());
            }
            return Ok(names);
        }
        let colon = rest.find(':').ok_or_else(err)?;
        let name = &rest[..colon];
        if name.is_empty() || name.contains(['<', '>', ';', '/']) {
            return Err(err());
        }
        names.push(name.to_string());
        rest = &rest[colon..];

        // Class bound (possibly empty) followed by any number of interface bounds.
        while let Some(after) = rest.strip_prefix(':') {
            rest = after;
            if matches!(rest.chars().next(), Some('L' | 'T' | '[')) {
                rest = skip_reference_type(rest).ok_or_else(err)?;
            }
        }
    }
}

fn skip_reference_type(input: &str) -> Option<&str> {
    match input.chars().next()? {
        '[' => skip_type(&input[1..]),
        'T' => Some(&input[input.find(';')? + 1..]),
        'L' => {
            let mut depth = 0usize;
            for (idx, c) in input.char_indices() {
                match c {
                    '<' => depth += 1,
                    '>' => depth = depth.checked_sub(1)?,
                    ';' if depth == 0 => return Some(&input[idx + 1..]),
                    _ => {}
                }
            }
            None
        }
        _ => None,
    }
}

fn skip_type(input: &str) -> Option<&str> {
    match input.chars().next()? {
        'Z' | 'B' | 'C' | 'S' | 'I' | 'J' | 'F' | 'D' => Some(&input[1..]),
        _ => skip_reference_type(input),
    }
}
