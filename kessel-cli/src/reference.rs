use kessel_sdk::v1beta2::{ReporterReference, RepresentationType, ResourceReference, SubjectReference};
use std::fmt;
use std::str::FromStr;

/// A resource written as `type:id@reporter`, the reporter being optional
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceArg {
    pub resource_type: String,
    pub resource_id: String,
    pub reporter: Option<String>,
}

impl FromStr for ResourceArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (resource, reporter) = split_reporter(s)?;
        let (resource_type, resource_id) = resource
            .split_once(':')
            .ok_or_else(|| format!("expected type:id[@reporter], got '{}'", s))?;

        if resource_type.is_empty() || resource_id.is_empty() {
            return Err(format!("resource type and id must not be empty in '{}'", s));
        }

        Ok(Self {
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
            reporter,
        })
    }
}

impl fmt::Display for ResourceArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource_id)?;
        if let Some(reporter) = &self.reporter {
            write!(f, "@{}", reporter)?;
        }
        Ok(())
    }
}

impl ResourceArg {
    pub fn to_reference(&self) -> ResourceReference {
        ResourceReference {
            resource_type: self.resource_type.clone(),
            resource_id: self.resource_id.clone(),
            reporter: self.reporter.as_ref().map(|reporter| ReporterReference {
                r#type: reporter.clone(),
                instance_id: None,
            }),
        }
    }

    pub fn to_subject(&self, relation: Option<String>) -> SubjectReference {
        SubjectReference {
            relation,
            resource: Some(self.to_reference()),
        }
    }
}

/// An object type written as `type@reporter`, the reporter being optional
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectTypeArg {
    pub resource_type: String,
    pub reporter: Option<String>,
}

impl FromStr for ObjectTypeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (resource_type, reporter) = split_reporter(s)?;
        if resource_type.is_empty() || resource_type.contains(':') {
            return Err(format!("expected type[@reporter], got '{}'", s));
        }
        Ok(Self {
            resource_type: resource_type.to_string(),
            reporter,
        })
    }
}

impl ObjectTypeArg {
    pub fn to_representation_type(&self) -> RepresentationType {
        RepresentationType {
            resource_type: self.resource_type.clone(),
            reporter_type: self.reporter.clone(),
        }
    }
}

fn split_reporter(s: &str) -> Result<(&str, Option<String>), String> {
    match s.rsplit_once('@') {
        Some((_, "")) => Err(format!("reporter must not be empty in '{}'", s)),
        Some((rest, reporter)) => Ok((rest, Some(reporter.to_string()))),
        None => Ok((s, None)),
    }
}
