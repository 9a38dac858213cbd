//! Attribute schemas for the provider block and its resources.

/// Value type of an attribute. Every attribute here is a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeType,
    /// Must be set by the user.
    pub required: bool,
    /// Filled in by the provider; never set by the user.
    pub computed: bool,
    /// Hidden from logs and plan output.
    pub sensitive: bool,
    /// A changed value forces delete-then-create.
    pub requires_replace: bool,
    pub description: &'static str,
}

impl Attribute {
    pub fn required_string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: AttributeType::String,
            required: true,
            computed: false,
            sensitive: false,
            requires_replace: false,
            description,
        }
    }

    pub fn computed_string(name: &'static str, description: &'static str) -> Self {
        Self {
            required: false,
            computed: true,
            ..Self::required_string(name, description)
        }
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Names of all user-required attributes, in declaration order.
    pub fn required(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes.iter().filter(|a| a.required).map(|a| a.name)
    }
}
