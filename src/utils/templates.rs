#![forbid(unsafe_code)]

use anyhow::{Result, anyhow};
use log::{info, warn};
use tera::{Context, Tera};

use crate::utils::chat_utils::get_files_in_dir;
use crate::utils::config::CHAT_DIRS;
use crate::utils::errors::Errors;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Template names as registered with the engine.  Autoescaping is keyed off
// the .html suffix.
pub const INDEX_TEMPLATE : &str = "index.html";

// Page title rendered into the chat page.
pub const PAGE_TITLE : &str = "Chat Server";

// The compiled-in page source.  Site operators can override it by installing
// an index.html file in the templates data directory.
const DEFAULT_INDEX_TEMPLATE : &str = include_str!("../../resources/templates/index.html");

// ***************************************************************************
//                             Public Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// default_templates:
// ---------------------------------------------------------------------------
/** Build a template engine containing only the compiled-in templates. */
pub fn default_templates() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template(INDEX_TEMPLATE, DEFAULT_INDEX_TEMPLATE)
        .unwrap_or_else(|e| {
            panic!("{}", Errors::TemplateError(INDEX_TEMPLATE.to_string(), e.to_string()));
        });
    tera
}

// ---------------------------------------------------------------------------
// init_templates:
// ---------------------------------------------------------------------------
/** Build the template engine used by the running server:  the compiled-in
 * templates plus any .html overrides installed in the templates data
 * directory.  Override failures are logged and skipped so that a bad site
 * template cannot take the server down.
 */
pub fn init_templates() -> Tera {
    let mut tera = default_templates();

    // Layer on the site's template overrides, if any.
    let dir = &CHAT_DIRS.templates_dir;
    let files = match get_files_in_dir(dir) {
        Ok(v) => v,
        Err(e) => {
            warn!("Unable to list template overrides in {}: {}", dir, e);
            return tera;
        }
    };

    for file in files {
        if file.extension().map(|e| e != "html").unwrap_or(true) {
            continue;
        }
        let name = match file.file_name() {
            Some(n) => n.to_string_lossy().to_string(),
            None => continue,
        };
        match tera.add_template_file(&file, Some(name.as_str())) {
            Ok(_) => info!("Loaded template override '{}' from {}.", name, dir),
            Err(e) => {
                let msg = format!("{}", Errors::TemplateError(name, e.to_string()));
                warn!("{}", msg);
            },
        }
    }

    tera
}

// ---------------------------------------------------------------------------
// render_index:
// ---------------------------------------------------------------------------
/** Render the chat page.  The user_input and bot_response variables are only
 * defined on the form submission path;  the template guards them so a plain
 * page render contains no echoed text.
 */
pub fn render_index(tera: &Tera, title: &str,
                    user_input: Option<&str>, bot_response: Option<&str>) -> Result<String> {
    let mut ctx = Context::new();
    ctx.insert("title", title);
    if let Some(u) = user_input {
        ctx.insert("user_input", u);
    }
    if let Some(b) = bot_response {
        ctx.insert("bot_response", b);
    }

    tera.render(INDEX_TEMPLATE, &ctx)
        .map_err(|e| anyhow!("{}", Errors::TemplateError(INDEX_TEMPLATE.to_string(), e.to_string())))
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_engine_registers_index() {
        let tera = default_templates();
        assert!(tera.get_template_names().any(|n| n == INDEX_TEMPLATE));
    }

    #[test]
    fn render_without_exchange_has_no_echo() {
        let tera = default_templates();
        let page = render_index(&tera, PAGE_TITLE, None, None).expect("render should succeed");
        assert!(page.contains(PAGE_TITLE));
        assert!(!page.contains("You said:"));
    }

    #[test]
    fn render_with_exchange_embeds_both_strings() {
        let tera = default_templates();
        let page = render_index(&tera, PAGE_TITLE, Some("test"), Some("You said: test"))
            .expect("render should succeed");
        assert!(page.contains("test"));
        assert!(page.contains("You said: test"));
    }
}
