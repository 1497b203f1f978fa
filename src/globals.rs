//! # Global Options
//!
//! A root document may declare process-wide named values:
//!
//! ```xml
//! <options>
//!   <option name="debug" default="false"/>
//!   <option name="sdk"/>
//! </options>
//! ```
//!
//! Values are bound from the command line (`--debug=true`, or `--debug`
//! meaning `true`) before any other part of the document is read. The
//! resulting [`GlobalOptions`] table is immutable afterwards and is passed
//! to the parser explicitly.
//!
//! Text passed through [`GlobalOptions::expand`] has `#[name]` replaced by
//! the option's value, and `#[!name]` by the negation of a boolean value.

use std::sync::OnceLock;

use indexmap::IndexMap;
use log::debug;
use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::options::parse_bool;

#[derive(Debug, Clone, Default)]
struct GlobalOption {
    default: Option<String>,
    value: Option<String>,
}

/// Declared global options and their bound values
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    options: IndexMap<String, GlobalOption>,
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"#\[(!?)([^\]\s]+)\]").expect("token pattern is valid"))
}

impl GlobalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the `options` block of a root element and apply `bindings`.
    ///
    /// Fails on a binding for an undeclared option, or on a declared option
    /// left with neither a default nor a binding.
    pub fn from_document(root: roxmltree::Node<'_, '_>, bindings: &[(String, String)]) -> Result<Self> {
        let mut globals = GlobalOptions::new();
        let declarations = root
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "options")
            .flat_map(|options| options.children())
            .filter(|n| n.is_element() && n.tag_name().name() == "option");
        for option in declarations {
            if let Some(name) = option.attribute("name") {
                globals.declare(name, option.attribute("default"));
            }
        }

        for (name, value) in bindings {
            globals.bind(name, value)?;
        }
        globals.check_required()?;
        Ok(globals)
    }

    pub fn declare(&mut self, name: &str, default: Option<&str>) {
        debug!("Declared option {} (default: {:?})", name, default);
        self.options.insert(
            name.to_string(),
            GlobalOption {
                default: default.map(str::to_string),
                value: None,
            },
        );
    }

    /// Bind a value to a declared option.
    pub fn bind(&mut self, name: &str, value: &str) -> Result<()> {
        let available = self.names();
        match self.options.get_mut(name) {
            Some(option) => {
                option.value = Some(value.to_string());
                Ok(())
            }
            None => Err(Error::UnknownOption {
                name: name.to_string(),
                available,
            }),
        }
    }

    /// Ensure every declared option has a value.
    pub fn check_required(&self) -> Result<()> {
        match self
            .options
            .iter()
            .find(|(_, option)| option.value.is_none() && option.default.is_none())
        {
            Some((name, _)) => Err(Error::RequiredOption {
                name: name.clone(),
                available: self.names(),
            }),
            None => Ok(()),
        }
    }

    /// Declared option names, in declaration order
    pub fn names(&self) -> Vec<String> {
        self.options.keys().cloned().collect()
    }

    /// The bound value, falling back to the default.
    pub fn value(&self, name: &str) -> Option<&str> {
        let option = self.options.get(name)?;
        option.value.as_deref().or(option.default.as_deref())
    }

    /// Substitute `#[name]` and `#[!name]` tokens.
    ///
    /// Tokens naming undeclared options, and negations of non-boolean
    /// values, are left untouched.
    pub fn expand(&self, text: &str) -> String {
        if self.options.is_empty() {
            return text.to_string();
        }
        token_pattern()
            .replace_all(text, |caps: &Captures<'_>| {
                let negate = !caps[1].is_empty();
                match self.value(&caps[2]) {
                    Some(value) if !negate => value.to_string(),
                    Some(value) => match parse_bool(value) {
                        Some(flag) => (!flag).to_string(),
                        None => caps[0].to_string(),
                    },
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}
