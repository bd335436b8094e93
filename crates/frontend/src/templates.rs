//! File-based minijinja rendering.
//!
//! A fresh [`minijinja::Environment`] is built per render call and the
//! template source is read from disk each time, templates are small and
//! this is an admin/search UI, not a hot path, so there's no need to cache
//! a loader.

use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to read template {0}: {1}")]
    Read(String, std::io::Error),
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
}

pub fn render(
    template_dir: &str,
    name: &str,
    ctx: impl serde::Serialize,
) -> Result<String, TemplateError> {
    let path = Path::new(template_dir).join(name);
    let source = std::fs::read_to_string(&path)
        .map_err(|e| TemplateError::Read(path.display().to_string(), e))?;

    let mut env = minijinja::Environment::new();
    env.add_template(name, &source)?;
    let tmpl = env.get_template(name)?;
    Ok(tmpl.render(ctx)?)
}
