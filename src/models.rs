use zeroize::Zeroize;

/// Read access to submitted field values by name.
///
/// `None` means the field was not part of the submission at all; `Some("")`
/// means it was submitted empty. Validation rules treat the two differently.
pub trait FormData {
    fn field(&self, name: &str) -> Option<&str>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignInRecord {
    pub email: String,
    pub password: String,
}

impl SignInRecord {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl FormData for SignInRecord {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "email" => Some(&self.email),
            "password" => Some(&self.password),
            _ => None,
        }
    }
}

impl Drop for SignInRecord {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignUpRecord {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignUpRecord {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl FormData for SignUpRecord {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "password" => Some(&self.password),
            _ => None,
        }
    }
}

impl Drop for SignUpRecord {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}
