//! Dalvik type descriptors and method signatures.
//!
//! Types, subsignatures and method descriptors are written in the Dalvik
//! format, e.g. `Landroid/view/View;`, `onClick(Landroid/view/View;)V` and
//! `com/example/Main->onClick(Landroid/view/View;)V`.

use crate::errors::{RepoError, RepoResult};
use std::convert::TryFrom;
use std::fmt;

/// A Dalvik type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Type {
    /// `void` type, only valid for return types.
    Void,
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    /// Array of the given type descriptor, usable recursively for arrays of arrays.
    Array(usize, Box<Self>),
    /// Type of a fully-qualified class
    Class(String),
}

impl Type {
    /// Returns the class name if the type is a class type.
    #[must_use]
    pub fn as_class_name(&self) -> Option<&str> {
        if let Self::Class(name) = self {
            Some(name)
        } else {
            None
        }
    }

    /// Parses a sequence of concatenated descriptors, as found between the
    /// parenthesis of a method prototype.
    pub fn parse_list(s: &str) -> RepoResult<Vec<Self>> {
        let mut types = Vec::new();
        let mut rest = s;
        while !rest.is_empty() {
            let dims = rest.bytes().take_while(|b| *b == b'[').count();
            let len = match rest.as_bytes().get(dims) {
                Some(b'L') => rest[dims..]
                    .find(';')
                    .map(|end| dims + end + 1)
                    .ok_or_else(|| RepoError::InvalidType(rest.to_string()))?,
                Some(_) => rest[dims..]
                    .chars()
                    .next()
                    .map(|c| dims + c.len_utf8())
                    .ok_or_else(|| RepoError::InvalidType(rest.to_string()))?,
                None => return Err(RepoError::InvalidType(rest.to_string())),
            };
            types.push(Self::try_from(&rest[..len])?);
            rest = &rest[len..];
        }
        Ok(types)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Void => write!(f, "V"),
            Self::Boolean => write!(f, "Z"),
            Self::Byte => write!(f, "B"),
            Self::Short => write!(f, "S"),
            Self::Char => write!(f, "C"),
            Self::Int => write!(f, "I"),
            Self::Long => write!(f, "J"),
            Self::Float => write!(f, "F"),
            Self::Double => write!(f, "D"),
            Self::Array(n, inner) => {
                for _ in 0..*n {
                    write!(f, "[")?;
                }
                write!(f, "{inner}")
            }
            Self::Class(classname) => write!(f, "L{classname};"),
        }
    }
}

impl TryFrom<&str> for Type {
    type Error = RepoError;

    fn try_from(s: &str) -> RepoResult<Self> {
        if s == "V" {
            return Ok(Self::Void);
        }

        let dims = s.bytes().take_while(|b| *b == b'[').count();
        if dims >= s.len() || dims >= 255 {
            return Err(RepoError::InvalidType(s.to_string()));
        }

        let t = match &s[dims..] {
            "Z" => Self::Boolean,
            "B" => Self::Byte,
            "S" => Self::Short,
            "C" => Self::Char,
            "I" => Self::Int,
            "J" => Self::Long,
            "F" => Self::Float,
            "D" => Self::Double,
            sub => {
                let l = sub.len();
                if l < 3 || !sub.starts_with('L') || !sub.ends_with(';') || sub[1..l - 1].contains(';')
                {
                    return Err(RepoError::InvalidType(s.to_string()));
                }
                Self::Class(sub[1..l - 1].to_string())
            }
        };

        if dims == 0 {
            Ok(t)
        } else {
            Ok(Self::Array(dims, Box::new(t)))
        }
    }
}

/// A method signature without its defining class.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubSignature {
    name: String,
    parameters_types: Vec<Type>,
    return_type: Type,
}

impl SubSignature {
    #[must_use]
    pub fn new(name: &str, parameters_types: Vec<Type>, return_type: Type) -> Self {
        Self {
            name: name.to_string(),
            parameters_types,
            return_type,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parameters_types(&self) -> &[Type] {
        &self.parameters_types
    }

    #[inline]
    pub fn return_type(&self) -> &Type {
        &self.return_type
    }
}

impl fmt::Display for SubSignature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for t in &self.parameters_types {
            write!(f, "{t}")?;
        }
        write!(f, "){}", self.return_type)
    }
}

impl TryFrom<&str> for SubSignature {
    type Error = RepoError;

    fn try_from(s: &str) -> RepoResult<Self> {
        let invalid = || RepoError::InvalidDescriptor(s.to_string());
        let open = s.find('(').ok_or_else(invalid)?;
        let close = s.rfind(')').ok_or_else(invalid)?;
        let name = &s[..open];
        if name.is_empty() || close < open {
            return Err(invalid());
        }
        Ok(Self {
            name: name.to_string(),
            parameters_types: Type::parse_list(&s[open + 1..close])?,
            return_type: Type::try_from(&s[close + 1..])?,
        })
    }
}

/// A fully qualified method reference: defining class and subsignature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodDescr {
    definer: String,
    subsignature: SubSignature,
}

impl MethodDescr {
    #[must_use]
    pub fn new(definer: &str, subsignature: SubSignature) -> Self {
        Self {
            definer: definer.to_string(),
            subsignature,
        }
    }

    #[inline]
    pub fn definer(&self) -> &str {
        &self.definer
    }

    #[inline]
    pub fn subsignature(&self) -> &SubSignature {
        &self.subsignature
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.subsignature.name()
    }
}

impl fmt::Display for MethodDescr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}->{}", self.definer, self.subsignature)
    }
}

impl TryFrom<&str> for MethodDescr {
    type Error = RepoError;

    fn try_from(s: &str) -> RepoResult<Self> {
        let (definer, subsig) = s
            .split_once("->")
            .ok_or_else(|| RepoError::InvalidDescriptor(s.to_string()))?;
        if definer.is_empty() {
            return Err(RepoError::InvalidDescriptor(s.to_string()));
        }
        Ok(Self {
            definer: definer.to_string(),
            subsignature: SubSignature::try_from(subsig)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_types() {
        assert_eq!(Type::try_from("V").unwrap(), Type::Void);
        assert_eq!(Type::try_from("J").unwrap(), Type::Long);
        assert_eq!(
            Type::try_from("Landroid/view/View;").unwrap(),
            Type::Class("android/view/View".to_string())
        );
        assert_eq!(
            Type::try_from("[[I").unwrap(),
            Type::Array(2, Box::new(Type::Int))
        );
    }

    #[test]
    fn reject_invalid_types() {
        assert!(Type::try_from("").is_err());
        assert!(Type::try_from("[").is_err());
        assert!(Type::try_from("Landroid/view/View").is_err());
        assert!(Type::try_from("L;").is_err());
        assert!(Type::try_from("Q").is_err());
    }

    #[test]
    fn parse_type_list() {
        let types = Type::parse_list("Landroid/widget/AdapterView;Landroid/view/View;IJ").unwrap();
        assert_eq!(types.len(), 4);
        assert_eq!(types[2], Type::Int);
        assert_eq!(types[3], Type::Long);
        assert!(Type::parse_list("").unwrap().is_empty());
        assert!(Type::parse_list("Landroid/view/View").is_err());
        assert!(Type::parse_list("[é").is_err());
        assert!(SubSignature::try_from("f(é)V").is_err());
        assert!(SubSignature::try_from("f(Ié)V").is_err());
    }

    #[test]
    fn subsignature_display() {
        let s = "onKey(Landroid/view/View;ILandroid/view/KeyEvent;)Z";
        let subsig = SubSignature::try_from(s).unwrap();
        assert_eq!(subsig.name(), "onKey");
        assert_eq!(subsig.parameters_types().len(), 3);
        assert_eq!(subsig.return_type(), &Type::Boolean);
        assert_eq!(subsig.to_string(), s);
    }

    #[test]
    fn method_descriptor() {
        let descr =
            MethodDescr::try_from("com/example/Main->onClick(Landroid/view/View;)V").unwrap();
        assert_eq!(descr.definer(), "com/example/Main");
        assert_eq!(descr.name(), "onClick");
        assert!(MethodDescr::try_from("onClick(Landroid/view/View;)V").is_err());
        assert!(MethodDescr::try_from("->onClick()V").is_err());
        assert!(MethodDescr::try_from("a/B->(I)V").is_err());
    }
}
