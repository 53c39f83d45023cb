//! The mutation rule set: renames, ignores, forced imports, and container
//! categorization.
//!
//! A [`RuleSet`] is assembled once by [`RuleSetBuilder`] before a
//! translation run and is read-only afterwards, so it can be shared
//! between units translated in parallel. Every pattern entry is a regular
//! expression matched against the whole name, Java `String.matches`
//! style.
//!
//! Rule evaluation order is fixed and caller-visible: explicit type
//! renames, then array-category patterns, then dictionary-category
//! patterns, then vector-category patterns. Each list is tested
//! independently and the last applied category wins, which makes the
//! vector category the strongest under the default order. The rename
//! tables are insertion-ordered (`IndexMap`), never hash-ordered, so the
//! outcome of overlapping rules is reproducible.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("invalid rule pattern `{pattern}`: {source}")]
    BadPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// A container category a variable can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Array,
    Vector,
    Dictionary,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Array => "Array",
            Category::Vector => "Vector",
            Category::Dictionary => "Dictionary",
        }
    }
}

/// Set of container categories assigned to a name. A name can accumulate
/// several flags when it matches more than one pattern list; flags are
/// only ever added, never removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFlags {
    pub array: bool,
    pub vector: bool,
    pub dictionary: bool,
}

impl CategoryFlags {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(category: Category) -> Self {
        let mut flags = Self::default();
        flags.insert(category);
        flags
    }

    pub fn insert(&mut self, category: Category) {
        match category {
            Category::Array => self.array = true,
            Category::Vector => self.vector = true,
            Category::Dictionary => self.dictionary = true,
        }
    }

    pub fn has(&self, category: Category) -> bool {
        match category {
            Category::Array => self.array,
            Category::Vector => self.vector,
            Category::Dictionary => self.dictionary,
        }
    }

    pub fn any(&self) -> bool {
        self.array || self.vector || self.dictionary
    }

    /// Add every flag set in `other`.
    pub fn merge(&mut self, other: CategoryFlags) {
        self.array |= other.array;
        self.vector |= other.vector;
        self.dictionary |= other.dictionary;
    }
}

/// A compiled whole-name pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    regex: Regex,
}

impl Pattern {
    fn compile(raw: &str) -> Result<Self, RulesError> {
        let regex = Regex::new(&format!("^(?:{raw})$")).map_err(|source| {
            RulesError::BadPattern {
                pattern: raw.to_string(),
                source,
            }
        })?;
        Ok(Pattern {
            raw: raw.to_string(),
            regex,
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Immutable rule configuration for one translation run.
#[derive(Debug, Clone)]
pub struct RuleSet {
    package_renames: Vec<(Pattern, String)>,
    type_renames: Vec<(Pattern, String)>,
    import_renames: Vec<(Pattern, String)>,
    import_ignores: Vec<Pattern>,
    forced_imports: Vec<String>,
    array_types: Vec<Pattern>,
    dictionary_types: Vec<Pattern>,
    vector_types: Vec<Pattern>,
    force_sprite: bool,
    force_movie_clip: bool,
    array_class: String,
    vector_class: String,
    dictionary_class: String,
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::new()
    }

    /// The standard mappings: `Exception` to `Error`, boxed numerics to
    /// `Number`, the JDK collection library to vectors and dictionaries.
    pub fn defaults() -> RuleSet {
        RuleSetBuilder::new()
            .with_defaults()
            .build()
            .expect("default rule patterns are valid")
    }

    /// Apply the type rename table to a name. Entries are tested in
    /// insertion order against the current name, so renames may chain.
    pub fn apply_type_renames(&self, name: &str) -> String {
        let mut current = name.to_string();
        for (pattern, replacement) in &self.type_renames {
            if pattern.matches(&current) {
                current = replacement.clone();
            }
        }
        current
    }

    /// Last matching package rename, if any. All entries are tested
    /// against the original name; the last match wins.
    pub fn rename_package(&self, name: &str) -> Option<&str> {
        let mut result = None;
        for (pattern, replacement) in &self.package_renames {
            if pattern.matches(name) {
                result = Some(replacement.as_str());
            }
        }
        result
    }

    pub fn import_ignored(&self, name: &str) -> bool {
        self.import_ignores.iter().any(|p| p.matches(name))
    }

    /// Every import-rename target whose pattern matches `name`, in table
    /// order.
    pub fn import_rename_targets(&self, name: &str) -> Vec<&str> {
        self.import_renames
            .iter()
            .filter(|(pattern, _)| pattern.matches(name))
            .map(|(_, replacement)| replacement.as_str())
            .collect()
    }

    pub fn forced_imports(&self) -> &[String] {
        &self.forced_imports
    }

    /// Test the three category lists against `name` independently and
    /// return every flag that matched.
    pub fn categorize(&self, name: &str) -> CategoryFlags {
        let mut flags = CategoryFlags::none();
        if self.array_types.iter().any(|p| p.matches(name)) {
            flags.insert(Category::Array);
        }
        if self.dictionary_types.iter().any(|p| p.matches(name)) {
            flags.insert(Category::Dictionary);
        }
        if self.vector_types.iter().any(|p| p.matches(name)) {
            flags.insert(Category::Vector);
        }
        flags
    }

    pub fn force_sprite(&self) -> bool {
        self.force_sprite
    }

    pub fn force_movie_clip(&self) -> bool {
        self.force_movie_clip
    }

    pub fn array_class(&self) -> &str {
        &self.array_class
    }

    pub fn vector_class(&self) -> &str {
        &self.vector_class
    }

    pub fn dictionary_class(&self) -> &str {
        &self.dictionary_class
    }
}

/// Caller-supplied rule overrides, layered on top of whatever the builder
/// already holds. This is the serde surface for rule files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOverrides {
    pub package_renames: IndexMap<String, String>,
    pub type_renames: IndexMap<String, String>,
    pub import_renames: IndexMap<String, String>,
    pub import_ignores: Vec<String>,
    pub forced_imports: Vec<String>,
    pub array_types: Vec<String>,
    pub dictionary_types: Vec<String>,
    pub vector_types: Vec<String>,
    pub force_sprite: Option<bool>,
    pub force_movie_clip: Option<bool>,
    pub array_class: Option<String>,
    pub vector_class: Option<String>,
    pub dictionary_class: Option<String>,
}

/// Builder for [`RuleSet`]. Collects raw pattern text; `build` compiles
/// everything, so a bad pattern is reported before any tree is touched.
#[derive(Debug, Clone, Default)]
pub struct RuleSetBuilder {
    package_renames: IndexMap<String, String>,
    type_renames: IndexMap<String, String>,
    import_renames: IndexMap<String, String>,
    import_ignores: Vec<String>,
    forced_imports: Vec<String>,
    array_types: Vec<String>,
    dictionary_types: Vec<String>,
    vector_types: Vec<String>,
    force_sprite: bool,
    force_movie_clip: bool,
    array_class: Option<String>,
    vector_class: Option<String>,
    dictionary_class: Option<String>,
}

impl RuleSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the default mutations. Derived from the JDK collection
    /// library's interface and implementation name sets.
    pub fn with_defaults(mut self) -> Self {
        self.forced_imports.push("flash.utils.Dictionary".to_string());

        self.import_ignores.push("java.*".to_string());
        self.import_renames.insert(
            r"java\.util\..*Map".to_string(),
            "flash.utils.Dictionary".to_string(),
        );

        for (from, to) in DEFAULT_TYPE_RENAMES {
            self.type_renames.insert((*from).to_string(), (*to).to_string());
        }
        for name in DEFAULT_VECTOR_TYPES {
            self.vector_types.push((*name).to_string());
        }
        for name in DEFAULT_DICTIONARY_TYPES {
            self.dictionary_types.push((*name).to_string());
        }
        self
    }

    pub fn rename_package(mut self, pattern: impl Into<String>, to: impl Into<String>) -> Self {
        self.package_renames.insert(pattern.into(), to.into());
        self
    }

    pub fn rename_type(mut self, pattern: impl Into<String>, to: impl Into<String>) -> Self {
        self.type_renames.insert(pattern.into(), to.into());
        self
    }

    pub fn rename_import(mut self, pattern: impl Into<String>, to: impl Into<String>) -> Self {
        self.import_renames.insert(pattern.into(), to.into());
        self
    }

    pub fn ignore_import(mut self, pattern: impl Into<String>) -> Self {
        self.import_ignores.push(pattern.into());
        self
    }

    pub fn force_import(mut self, name: impl Into<String>) -> Self {
        self.forced_imports.push(name.into());
        self
    }

    pub fn array_type(mut self, pattern: impl Into<String>) -> Self {
        self.array_types.push(pattern.into());
        self
    }

    pub fn dictionary_type(mut self, pattern: impl Into<String>) -> Self {
        self.dictionary_types.push(pattern.into());
        self
    }

    pub fn vector_type(mut self, pattern: impl Into<String>) -> Self {
        self.vector_types.push(pattern.into());
        self
    }

    pub fn force_sprite(mut self, on: bool) -> Self {
        self.force_sprite = on;
        self
    }

    pub fn force_movie_clip(mut self, on: bool) -> Self {
        self.force_movie_clip = on;
        self
    }

    pub fn array_class(mut self, name: impl Into<String>) -> Self {
        self.array_class = Some(name.into());
        self
    }

    pub fn vector_class(mut self, name: impl Into<String>) -> Self {
        self.vector_class = Some(name.into());
        self
    }

    pub fn dictionary_class(mut self, name: impl Into<String>) -> Self {
        self.dictionary_class = Some(name.into());
        self
    }

    /// Layer caller overrides on top of the current contents. Map entries
    /// replace same-keyed defaults; list entries append; flag and name
    /// overrides apply only when present.
    pub fn apply(mut self, overrides: &RuleOverrides) -> Self {
        for (k, v) in &overrides.package_renames {
            self.package_renames.insert(k.clone(), v.clone());
        }
        for (k, v) in &overrides.type_renames {
            self.type_renames.insert(k.clone(), v.clone());
        }
        for (k, v) in &overrides.import_renames {
            self.import_renames.insert(k.clone(), v.clone());
        }
        self.import_ignores.extend(overrides.import_ignores.iter().cloned());
        self.forced_imports.extend(overrides.forced_imports.iter().cloned());
        self.array_types.extend(overrides.array_types.iter().cloned());
        self.dictionary_types
            .extend(overrides.dictionary_types.iter().cloned());
        self.vector_types.extend(overrides.vector_types.iter().cloned());
        if let Some(on) = overrides.force_sprite {
            self.force_sprite = on;
        }
        if let Some(on) = overrides.force_movie_clip {
            self.force_movie_clip = on;
        }
        if let Some(name) = &overrides.array_class {
            self.array_class = Some(name.clone());
        }
        if let Some(name) = &overrides.vector_class {
            self.vector_class = Some(name.clone());
        }
        if let Some(name) = &overrides.dictionary_class {
            self.dictionary_class = Some(name.clone());
        }
        self
    }

    pub fn build(self) -> Result<RuleSet, RulesError> {
        fn compile_map(
            table: IndexMap<String, String>,
        ) -> Result<Vec<(Pattern, String)>, RulesError> {
            table
                .into_iter()
                .map(|(raw, to)| Ok((Pattern::compile(&raw)?, to)))
                .collect()
        }

        fn compile_list(list: Vec<String>) -> Result<Vec<Pattern>, RulesError> {
            list.iter().map(|raw| Pattern::compile(raw)).collect()
        }

        Ok(RuleSet {
            package_renames: compile_map(self.package_renames)?,
            type_renames: compile_map(self.type_renames)?,
            import_renames: compile_map(self.import_renames)?,
            import_ignores: compile_list(self.import_ignores)?,
            forced_imports: self.forced_imports,
            array_types: compile_list(self.array_types)?,
            dictionary_types: compile_list(self.dictionary_types)?,
            vector_types: compile_list(self.vector_types)?,
            force_sprite: self.force_sprite,
            force_movie_clip: self.force_movie_clip,
            array_class: self.array_class.unwrap_or_else(|| "Array".to_string()),
            vector_class: self.vector_class.unwrap_or_else(|| "Vector".to_string()),
            dictionary_class: self
                .dictionary_class
                .unwrap_or_else(|| "Dictionary".to_string()),
        })
    }
}

const DEFAULT_TYPE_RENAMES: &[(&str, &str)] = &[
    ("Exception", "Error"),
    ("java.lang.Exception", "Error"),
    ("Integer", "Number"),
    ("java.lang.Integer", "Number"),
    ("Double", "Number"),
    ("java.lang.Double", "Number"),
    ("Float", "Number"),
    ("java.lang.Float", "Number"),
    ("Long", "Number"),
    ("java.lang.Long", "Number"),
    ("Short", "Number"),
    ("java.lang.Short", "Number"),
    ("Character", "String"),
    ("java.lang.Character", "String"),
];

// The java.util.Collection interface and implementation families, simple
// and qualified forms.
const DEFAULT_VECTOR_TYPES: &[&str] = &[
    "Collection",
    "java.util.Collection",
    // interfaces
    "BeanContext",
    "java.beans.beancontext.BeanContext",
    "BeanContextServices",
    "java.beans.beancontext.BeanContextServices",
    "BlockingDeque",
    "java.util.concurrent.BlockingDeque",
    "BlockingQueue",
    "java.util.concurrent.BlockingQueue",
    "Deque",
    "java.util.Deque",
    "List",
    "java.util.List",
    "NavigableSet",
    "java.util.NavigableSet",
    "Queue",
    "java.util.Queue",
    "Set",
    "java.util.Set",
    "SortedSet",
    "java.util.SortedSet",
    // implementing classes
    "AbstractCollection",
    "java.util.AbstractCollection",
    "AbstractList",
    "java.util.AbstractList",
    "AbstractQueue",
    "java.util.AbstractQueue",
    "AbstractSequentialList",
    "java.util.AbstractSequentialList",
    "AbstractSet",
    "java.util.AbstractSet",
    "ArrayBlockingQueue",
    "java.util.concurrent.ArrayBlockingQueue",
    "ArrayDeque",
    "java.util.ArrayDeque",
    "ArrayList",
    "java.util.ArrayList",
    "AttributeList",
    "javax.management.AttributeList",
    "BeanContextServicesSupport",
    "java.beans.beancontext.BeanContextServicesSupport",
    "BeanContextSupport",
    "java.beans.beancontext.BeanContextSupport",
    "ConcurrentLinkedQueue",
    "java.util.concurrent.ConcurrentLinkedQueue",
    "ConcurrentSkipListSet",
    "java.util.concurrent.ConcurrentSkipListSet",
    "CopyOnWriteArrayList",
    "java.util.concurrent.CopyOnWriteArrayList",
    "CopyOnWriteArraySet",
    "java.util.concurrent.CopyOnWriteArraySet",
    "DelayQueue",
    "java.util.concurrent.DelayQueue",
    "EnumSet",
    "java.util.EnumSet",
    "HashSet",
    "java.util.HashSet",
    "JobStateReasons",
    "javax.print.attribute.standard.JobStateReasons",
    "LinkedBlockingDeque",
    "java.util.concurrent.LinkedBlockingDeque",
    "LinkedBlockingQueue",
    "java.util.concurrent.LinkedBlockingQueue",
    "LinkedHashSet",
    "java.util.LinkedHashSet",
    "LinkedList",
    "java.util.LinkedList",
    "PriorityBlockingQueue",
    "java.util.concurrent.PriorityBlockingQueue",
    "PriorityQueue",
    "java.util.PriorityQueue",
    "RoleList",
    "javax.management.relation.RoleList",
    "RoleUnresolvedList",
    "javax.management.relation.RoleUnresolvedList",
    "Stack",
    "java.util.Stack",
    "SynchronousQueue",
    "java.util.concurrent.SynchronousQueue",
    "TreeSet",
    "java.util.TreeSet",
    "Vector",
    "java.util.Vector",
];

// The java.util.Map interface and implementation families, simple and
// qualified forms.
const DEFAULT_DICTIONARY_TYPES: &[&str] = &[
    "Map",
    "java.util.Map",
    // interfaces
    "Bindings",
    "javax.script.Bindings",
    "ConcurrentMap",
    "java.util.concurrent.ConcurrentMap",
    "ConcurrentNavigableMap",
    "java.util.concurrent.ConcurrentNavigableMap",
    "LogicalMessageContext",
    "javax.xml.ws.handler.LogicalMessageContext",
    "MessageContext",
    "javax.xml.ws.handler.MessageContext",
    "NavigableMap",
    "java.util.NavigableMap",
    "SOAPMessageContext",
    "javax.xml.ws.handler.soap.SOAPMessageContext",
    "SortedMap",
    "java.util.SortedMap",
    // classes
    "AbstractMap",
    "java.util.AbstractMap",
    "Attributes",
    "java.util.jar.Attributes",
    "AuthProvider",
    "java.security.AuthProvider",
    "ConcurrentHashMap",
    "java.util.concurrent.ConcurrentHashMap",
    "ConcurrentSkipListMap",
    "java.util.concurrent.ConcurrentSkipListMap",
    "EnumMap",
    "java.util.EnumMap",
    "HashMap",
    "java.util.HashMap",
    "Hashtable",
    "java.util.Hashtable",
    "IdentityHashMap",
    "java.util.IdentityHashMap",
    "LinkedHashMap",
    "java.util.LinkedHashMap",
    "PrinterStateReasons",
    "javax.print.attribute.standard.PrinterStateReasons",
    "Properties",
    "java.util.Properties",
    "Provider",
    "java.security.Provider",
    "RenderingHints",
    "java.awt.RenderingHints",
    "SimpleBindings",
    "javax.script.SimpleBindings",
    "TabularDataSupport",
    "javax.management.openmbean.TabularDataSupport",
    "TreeMap",
    "java.util.TreeMap",
    "UIDefaults",
    "javax.swing.UIDefaults",
    "WeakHashMap",
    "java.util.WeakHashMap",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_match_the_whole_name() {
        let rules = RuleSet::builder()
            .vector_type("List")
            .build()
            .unwrap();
        assert!(rules.categorize("List").vector);
        assert!(!rules.categorize("ArrayList").vector);
        assert!(!rules.categorize("Lists").vector);
    }

    #[test]
    fn defaults_categorize_the_jdk_collections() {
        let rules = RuleSet::defaults();
        assert!(rules.categorize("ArrayList").vector);
        assert!(rules.categorize("java.util.List").vector);
        assert!(rules.categorize("HashMap").dictionary);
        assert!(rules.categorize("ConcurrentNavigableMap").dictionary);
        assert!(!rules.categorize("StringBuilder").any());
    }

    #[test]
    fn type_renames_chain_in_insertion_order() {
        let rules = RuleSet::builder()
            .rename_type("Exception", "Error")
            .rename_type("Error", "Fault")
            .build()
            .unwrap();
        assert_eq!(rules.apply_type_renames("Exception"), "Fault");

        // Reversed insertion order stops after the first hop.
        let rules = RuleSet::builder()
            .rename_type("Error", "Fault")
            .rename_type("Exception", "Error")
            .build()
            .unwrap();
        assert_eq!(rules.apply_type_renames("Exception"), "Error");
    }

    #[test]
    fn overrides_replace_map_entries_and_extend_lists() {
        let overrides = RuleOverrides {
            type_renames: [("Exception".to_string(), "Problem".to_string())]
                .into_iter()
                .collect(),
            vector_types: vec!["MyList".to_string()],
            dictionary_class: Some("Hash".to_string()),
            ..Default::default()
        };
        let rules = RuleSet::builder()
            .with_defaults()
            .apply(&overrides)
            .build()
            .unwrap();

        assert_eq!(rules.apply_type_renames("Exception"), "Problem");
        assert!(rules.categorize("MyList").vector);
        assert!(rules.categorize("ArrayList").vector);
        assert_eq!(rules.dictionary_class(), "Hash");
        assert_eq!(rules.vector_class(), "Vector");
    }

    #[test]
    fn bad_pattern_is_reported_at_build_time() {
        let err = RuleSet::builder().array_type("[invalid").build();
        assert!(matches!(err, Err(RulesError::BadPattern { .. })));
    }

    #[test]
    fn import_rules_use_full_match_semantics() {
        let rules = RuleSet::defaults();
        assert!(rules.import_ignored("java.util.List"));
        assert!(!rules.import_ignored("org.example.Widget"));
        assert_eq!(
            rules.import_rename_targets("java.util.HashMap"),
            vec!["flash.utils.Dictionary"]
        );
        assert!(rules.import_rename_targets("java.util.List").is_empty());
    }
}
