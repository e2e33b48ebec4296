//! A loaded template.

use std::io::Write;

use il_builtins::MAIN_NAME;
use il_eval::{Args, Environment, Object};
use serde::Serialize;

use crate::TemplateError;

/// A module environment holding an appliable `Main`.
#[derive(Clone, Debug)]
pub struct Template {
    env: Environment,
    main: Object,
}

impl Template {
    pub(crate) fn from_env(env: Environment) -> Result<Self, TemplateError> {
        let main = env.lookup(MAIN_NAME).ok_or(TemplateError::MissingMain)?;
        if !main.is_appliable() {
            return Err(TemplateError::MainNotAppliable(main.type_name()));
        }
        Ok(Template { env, main })
    }

    /// The environment the template's top level ran in.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Apply `Main` with `data` visible and write its textual form.
    ///
    /// Object-shaped data exposes its fields as read-only bindings; any
    /// other value exposes nothing. Returns the number of bytes written.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn execute<T>(&self, out: &mut dyn Write, data: &T) -> Result<u64, TemplateError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_value(data)?;
        let call_env = Environment::local(&Environment::data(&data, Some(&self.env)));
        let result = self
            .main
            .apply_with_data(&data, &call_env, Args::empty())
            .ok_or(TemplateError::MainNotAppliable(self.main.type_name()))?
            .map_err(|_| TemplateError::EscapedReturn)?;
        let written = result.write_to(out)?;
        tracing::debug!(bytes = written, "template rendered");
        Ok(written)
    }

    /// Render into a string.
    pub fn render<T>(&self, data: &T) -> Result<String, TemplateError>
    where
        T: Serialize + ?Sized,
    {
        let mut out = Vec::new();
        self.execute(&mut out, data)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
