//! # Configurations and Configuration Holders
//!
//! A [`Configuration`] is a named bag of parsed option values ("Debug",
//! "Release", ...) plus a tri-state excluded-from-build flag.
//!
//! A [`ConfigurationHolder`] owns named configurations, an optional shared
//! configuration that every sibling inherits from, and a list of
//! [`ConfigurationRule`]s. A rule is a holder scoped to the files matching a
//! wildcard pattern, which is how per-file overrides are expressed. The
//! solution and each project are holders.
//!
//! ## Inheritance
//!
//! Merging is not commutative. The narrowest scope merges *into itself*
//! using each wider scope in turn:
//!
//! 1. [`ConfigurationHolder::apply_shared`] folds a holder's shared
//!    configuration into each of its named configurations.
//! 2. [`ConfigurationHolder::merge_from`] folds a parent holder's matching
//!    named configuration (or its shared one) into each configuration.
//!
//! Values already present in the child always win, except list options,
//! which accumulate child entries followed by parent entries.

use std::collections::BTreeMap;

use glob::{MatchOptions, Pattern};

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::options::{self, OptionKey, OptionValue, Scope};

/// A named set of option values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    name: String,
    is_shared: bool,
    excluded_from_build: Option<bool>,
    values: BTreeMap<OptionKey, OptionValue>,
}

impl Configuration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_shared(&self) -> bool {
        self.is_shared
    }

    /// Parse `raw` for the option `name` in `scope` and store it.
    ///
    /// Returns `false` and records an error when the name is not a
    /// registered option; the configuration is left unchanged.
    pub fn add_option(
        &mut self,
        scope: Scope,
        name: &str,
        raw: &str,
        diag: &mut Diagnostics,
    ) -> bool {
        match options::parse(scope, name, raw, diag) {
            Ok((key, value)) => {
                self.values.insert(key, value);
                true
            }
            Err(unknown) => {
                diag.error(unknown.to_string());
                false
            }
        }
    }

    pub fn set_option(&mut self, key: OptionKey, value: OptionValue) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: OptionKey) -> Option<&OptionValue> {
        self.values.get(&key)
    }

    /// Look up an option by scope and (case-insensitive) name.
    pub fn get_option(&self, scope: Scope, name: &str) -> Option<&OptionValue> {
        OptionKey::lookup(scope, name).and_then(|key| self.get(key))
    }

    /// Values set in `scope`, in registry order.
    pub fn options(&self, scope: Scope) -> impl Iterator<Item = (OptionKey, &OptionValue)> {
        self.values
            .iter()
            .filter(move |(key, _)| key.scope() == scope)
            .map(|(key, value)| (*key, value))
    }

    /// Values set in `scope` converted to their serialized text.
    pub fn option_strings(&self, scope: Scope) -> Vec<(&'static str, String)> {
        self.options(scope)
            .map(|(key, value)| (key.name(), value.to_option_string()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.excluded_from_build.is_none()
    }

    /// Tri-state flag: `None` means "inherit".
    pub fn excluded_from_build(&self) -> Option<bool> {
        self.excluded_from_build
    }

    pub fn is_excluded_from_build(&self) -> bool {
        self.excluded_from_build == Some(true)
    }

    pub fn set_excluded_from_build(&mut self, excluded: bool) {
        self.excluded_from_build = Some(excluded);
    }

    /// Fold a parent's values into this configuration.
    ///
    /// Missing values are adopted from `parent`; values present on both sides
    /// are combined with [`OptionValue::merged`]; the excluded flag is only
    /// adopted while still unset.
    pub fn merge(&mut self, parent: &Configuration) {
        for scope in Scope::ALL {
            for key in OptionKey::all(scope) {
                let Some(inherited) = parent.values.get(&key) else {
                    continue;
                };
                let own = self.values.remove(&key);
                if let Some(value) = OptionValue::merged(own, Some(inherited)) {
                    self.values.insert(key, value);
                }
            }
        }

        if self.excluded_from_build.is_none() {
            self.excluded_from_build = parent.excluded_from_build;
        }
    }
}

/// Owner of named configurations, a shared configuration and file rules
#[derive(Debug, Clone, Default)]
pub struct ConfigurationHolder {
    configurations: Vec<Configuration>,
    shared: Option<Configuration>,
    rules: Vec<ConfigurationRule>,
    shared_applied: bool,
}

impl ConfigurationHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    pub fn shared_configuration(&self) -> Option<&Configuration> {
        self.shared.as_ref()
    }

    pub fn rules(&self) -> &[ConfigurationRule] {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut [ConfigurationRule] {
        &mut self.rules
    }

    pub fn find_configuration(&self, name: &str) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.name == name)
    }

    pub fn find_configuration_mut(&mut self, name: &str) -> Option<&mut Configuration> {
        self.configurations.iter_mut().find(|c| c.name == name)
    }

    pub fn add_configuration(&mut self, configuration: Configuration) {
        self.configurations.push(configuration);
    }

    /// The configuration called `name`, created empty if absent.
    pub fn configuration_entry(&mut self, name: &str) -> &mut Configuration {
        let index = match self.configurations.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.configurations.push(Configuration::new(name));
                self.configurations.len() - 1
            }
        };
        &mut self.configurations[index]
    }

    /// Install `configuration` as the shared one (marking it shared).
    pub fn set_shared_configuration(&mut self, mut configuration: Configuration) {
        configuration.is_shared = true;
        self.shared = Some(configuration);
    }

    /// The shared configuration, created empty if absent.
    pub fn shared_entry(&mut self, name: &str) -> &mut Configuration {
        self.shared.get_or_insert_with(|| {
            let mut configuration = Configuration::new(name);
            configuration.is_shared = true;
            configuration
        })
    }

    /// Return the rule with exactly this pattern, creating it if needed.
    pub fn find_or_create_rule(&mut self, pattern: &str) -> Result<&mut ConfigurationRule> {
        let index = match self.rules.iter().position(|r| r.pattern == pattern) {
            Some(index) => index,
            None => {
                self.rules.push(ConfigurationRule::new(pattern)?);
                self.rules.len() - 1
            }
        };
        Ok(&mut self.rules[index])
    }

    /// Fold the shared configuration into every named configuration.
    ///
    /// Runs at most once per holder.
    pub fn apply_shared(&mut self) {
        if self.shared_applied {
            return;
        }
        self.shared_applied = true;
        if let Some(shared) = &self.shared {
            for configuration in &mut self.configurations {
                configuration.merge(shared);
            }
        }
    }

    /// Inherit from a wider holder.
    ///
    /// Every configuration here merges the parent's same-named configuration
    /// and then the parent's shared configuration. Precedence is local values,
    /// then the parent's named values, then the parent's shared values.
    ///
    /// A parent's shared configuration reaches a child exactly once. After
    /// [`apply_shared`](Self::apply_shared) the parent's named configurations
    /// already contain it, so it is merged directly only where no named
    /// counterpart exists. List values are therefore never concatenated twice.
    pub fn merge_from(&mut self, parent: &ConfigurationHolder) {
        for configuration in &mut self.configurations {
            let named = parent.find_configuration(&configuration.name);
            if let Some(named) = named {
                configuration.merge(named);
            }
            if let Some(shared) = &parent.shared {
                if named.is_none() || !parent.shared_applied {
                    configuration.merge(shared);
                }
            }
        }
    }

    /// Full inheritance of a project from its solution: create an empty
    /// configuration for every parent configuration missing here, apply
    /// the local shared configuration, then [`merge_from`](Self::merge_from).
    pub fn inherit_from(&mut self, parent: &ConfigurationHolder) {
        for configuration in &parent.configurations {
            if self.find_configuration(&configuration.name).is_none() {
                self.configurations.push(Configuration::new(configuration.name.clone()));
            }
        }
        self.apply_shared();
        self.merge_from(parent);
    }
}

/// A configuration holder scoped to files matching a wildcard pattern
#[derive(Debug, Clone)]
pub struct ConfigurationRule {
    pattern: String,
    matcher: Pattern,
    holder: ConfigurationHolder,
}

impl ConfigurationRule {
    /// Compile `pattern`. `*` and `?` stay within one path segment, `**`
    /// spans directories. Both `/` and `\` are accepted as separators.
    pub fn new(pattern: &str) -> Result<Self> {
        let matcher = Pattern::new(&pattern.replace('\\', "/"))?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
            holder: ConfigurationHolder::new(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Match a path relative to the owning holder's base directory.
    pub fn matches(&self, relative_path: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.matcher
            .matches_with(&relative_path.replace('\\', "/"), options)
    }

    pub fn holder(&self) -> &ConfigurationHolder {
        &self.holder
    }

    pub fn holder_mut(&mut self) -> &mut ConfigurationHolder {
        &mut self.holder
    }
}
