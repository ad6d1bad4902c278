//! Two-phase schema builder
//!
//! Schema construction is explicit: create a builder, call
//! [`declare_field`] once per field, then [`finalize`] exactly once. The
//! finalize step resolves the schema's local name, freezes the field table,
//! and registers every field into a fresh wire-schema container in
//! declaration order.
//!
//! [`declare_field`]: SchemaBuilder::declare_field
//! [`finalize`]: SchemaBuilder::finalize

use std::any;
use std::sync::Arc;

use protoclass_codec::{FieldDescriptor, MessageSchema, Rule, SchemaViolation};
use tracing::debug;

use super::decl::{FieldDeclaration, FieldOptions};
use super::registry;
use super::table::{FieldTable, TableState};

/// Error type for schema construction
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// No explicit name, and the type path yielded no usable identifier
    #[error("no resolvable schema name (type path: {type_path:?}); supply an explicit name")]
    UnnamedSchema { type_path: Option<String> },

    /// The wire-schema container rejected a field registration
    #[error(transparent)]
    Violation(#[from] SchemaViolation),
}

/// Frozen per-class schema metadata.
///
/// Produced once by [`SchemaBuilder::finalize`] and never mutated
/// afterward: the resolved local name, the frozen declaration table, and
/// the wire-schema descriptor handed to the codec.
#[derive(Debug, Clone)]
pub struct ClassSchema {
    local_name: String,
    items: Arc<FieldTable>,
    descriptor: MessageSchema,
}

impl ClassSchema {
    /// Wire-level schema name
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// The frozen declaration table, in declaration order
    pub fn items(&self) -> &FieldTable {
        &self.items
    }

    /// Declaration for a field key
    pub fn get(&self, key: &str) -> Option<&FieldDeclaration> {
        self.items.get(key)
    }

    /// The wire-schema descriptor consumed by the codec
    pub fn descriptor(&self) -> &MessageSchema {
        &self.descriptor
    }

    /// Handle to the frozen table, for [`SchemaBuilder::extending`]
    pub fn share_items(&self) -> Arc<FieldTable> {
        Arc::clone(&self.items)
    }
}

/// Builder accumulating field declarations for one class.
///
/// # Example
///
/// ```
/// use protoclass_core::schema::{FieldOptions, SchemaBuilder};
///
/// let mut builder = SchemaBuilder::named("Envelope");
/// let mut id = FieldOptions::new(1);
/// id.wire_type = Some("uint32".into());
/// id.required = true;
/// builder.declare_field("id", id);
/// builder.declare_field("payload", FieldOptions::new(2));
///
/// let schema = builder.finalize()?;
/// assert_eq!(schema.local_name(), "Envelope");
/// assert_eq!(schema.descriptor().len(), 2);
/// # Ok::<(), protoclass_core::schema::SchemaError>(())
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    explicit_name: Option<String>,
    type_path: Option<&'static str>,
    table: TableState,
}

impl SchemaBuilder {
    /// Anonymous builder; a name must be set before finalize can succeed
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with an explicit wire-level name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            explicit_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Builder that derives its name from a type's path.
    ///
    /// An explicit [`name`] still takes precedence when set.
    ///
    /// [`name`]: SchemaBuilder::name
    pub fn for_type<T: ?Sized>() -> Self {
        Self {
            type_path: Some(any::type_name::<T>()),
            ..Self::default()
        }
    }

    /// Set the explicit wire-level name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.explicit_name = Some(name.into());
        self
    }

    /// Inherit a parent schema's declarations.
    ///
    /// The parent's table is shared by reference until this builder
    /// declares a field of its own, at which point it is copied. Call this
    /// before any [`declare_field`]; declarations made earlier are
    /// discarded with the replaced table.
    ///
    /// [`declare_field`]: SchemaBuilder::declare_field
    pub fn extending(mut self, parent: &ClassSchema) -> Self {
        self.table = TableState::inherited(parent.share_items());
        self
    }

    /// Declare one field.
    ///
    /// Applies the declarative defaults (wire type `"bytes"`, wire name =
    /// `key`) and inserts into the class's table; declaring the same key
    /// again fully replaces the earlier declaration. Nothing is validated
    /// here; misdeclarations surface at [`finalize`] or inside the codec.
    ///
    /// [`finalize`]: SchemaBuilder::finalize
    pub fn declare_field(&mut self, key: impl Into<String>, options: FieldOptions) -> &mut Self {
        let declaration = FieldDeclaration::from_options(key, options);
        self.table.to_mut().insert(declaration);
        self
    }

    /// Freeze the declarations into a [`ClassSchema`].
    ///
    /// Resolves the local name, walks the table in declaration order
    /// deriving each field's rule token (`repeated` wins over `required`;
    /// neither means optional), registers the descriptors into a fresh
    /// wire-schema container, and publishes the finished schema in the
    /// global registry.
    ///
    /// An empty table is valid and produces an empty descriptor.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnnamedSchema`] if no name tier resolves, and
    /// [`SchemaError::Violation`] if the container rejects a field (e.g. a
    /// duplicate id). Both are unrecoverable declaration-time faults.
    pub fn finalize(self) -> Result<Arc<ClassSchema>, SchemaError> {
        let local_name = resolve_local_name(self.explicit_name.as_deref(), self.type_path)?;
        let items = self.table.freeze();

        let mut descriptor = MessageSchema::new(local_name.as_str());
        for declaration in items.iter() {
            let rule = if declaration.repeated {
                Some(Rule::Repeated)
            } else if declaration.required {
                Some(Rule::Required)
            } else {
                None
            };
            descriptor.add(FieldDescriptor::new(
                declaration.name.as_str(),
                declaration.id,
                declaration.wire_type.as_str(),
                rule,
            ))?;
        }

        debug!("Finalized schema {} ({} fields)", local_name, items.len());

        let schema = Arc::new(ClassSchema {
            local_name,
            items,
            descriptor,
        });
        registry::register(Arc::clone(&schema));
        Ok(schema)
    }
}

/// Resolve a schema's local name.
///
/// Precedence: the explicit name, then the type's own trailing path
/// identifier (generic arguments stripped), then a leading-identifier match
/// over the raw trailing segment. The last tier exists for exotic type
/// paths and is a last resort, not the primary path.
pub(crate) fn resolve_local_name(
    explicit: Option<&str>,
    type_path: Option<&str>,
) -> Result<String, SchemaError> {
    if let Some(name) = explicit {
        return Ok(name.to_string());
    }

    let path = type_path.ok_or(SchemaError::UnnamedSchema { type_path: None })?;

    // The type's own name: trailing path segment with generics stripped
    let base = path.split('<').next().unwrap_or(path).trim();
    let tail = base.rsplit("::").next().unwrap_or(base).trim();
    if is_identifier(tail) {
        return Ok(tail.to_string());
    }

    // Last resort: leading identifier of the raw trailing segment
    let raw_tail = path.rsplit("::").next().unwrap_or(path).trim();
    match leading_identifier(raw_tail) {
        Some(name) => Ok(name.to_string()),
        None => Err(SchemaError::UnnamedSchema {
            type_path: Some(path.to_string()),
        }),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn leading_identifier(s: &str) -> Option<&str> {
    let mut end = 0;
    for (i, c) in s.char_indices() {
        let ok = if i == 0 {
            c.is_alphabetic() || c == '_'
        } else {
            c.is_alphanumeric() || c == '_'
        };
        if !ok {
            break;
        }
        end = i + c.len_utf8();
    }
    if end == 0 {
        None
    } else {
        Some(&s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protoclass_codec::wire_type;

    struct Plain;

    fn options(id: u32) -> FieldOptions {
        FieldOptions::new(id)
    }

    #[test]
    fn test_empty_builder_finalizes_to_empty_descriptor() {
        let schema = SchemaBuilder::named("Empty").finalize().unwrap();
        assert_eq!(schema.local_name(), "Empty");
        assert!(schema.items().is_empty());
        assert!(schema.descriptor().is_empty());
    }

    #[test]
    fn test_declaration_order_and_rule_mapping() {
        let mut builder = SchemaBuilder::named("Rules");

        let mut a = options(1);
        a.required = true;
        builder.declare_field("a", a);

        let mut b = options(2);
        b.repeated = true;
        builder.declare_field("b", b);

        builder.declare_field("c", options(3));

        let schema = builder.finalize().unwrap();
        let fields: Vec<_> = schema.descriptor().fields().collect();
        assert_eq!(fields.len(), 3);

        assert_eq!(fields[0].name, "a");
        assert_eq!(fields[0].id, 1);
        assert_eq!(fields[0].rule, Some(Rule::Required));

        assert_eq!(fields[1].name, "b");
        assert_eq!(fields[1].id, 2);
        assert_eq!(fields[1].rule, Some(Rule::Repeated));

        assert_eq!(fields[2].name, "c");
        assert_eq!(fields[2].id, 3);
        assert_eq!(fields[2].rule, None);
    }

    #[test]
    fn test_repeated_wins_over_required() {
        let mut builder = SchemaBuilder::named("Both");
        let mut both = options(1);
        both.required = true;
        both.repeated = true;
        builder.declare_field("both", both);

        let schema = builder.finalize().unwrap();
        assert_eq!(
            schema.descriptor().get("both").unwrap().rule,
            Some(Rule::Repeated)
        );
    }

    #[test]
    fn test_wire_name_and_type_defaults() {
        let mut builder = SchemaBuilder::named("Defaults");
        builder.declare_field("plain", options(1));

        let mut named = options(2);
        named.name = Some("renamed".to_string());
        named.wire_type = Some(wire_type::UINT32.to_string());
        builder.declare_field("other", named);

        let schema = builder.finalize().unwrap();
        assert_eq!(schema.descriptor().get("plain").unwrap().wire_type, "bytes");
        let renamed = schema.descriptor().get("renamed").unwrap();
        assert_eq!(renamed.id, 2);
        assert_eq!(renamed.wire_type, "uint32");
        // The declaration table is keyed by the field's own key
        assert_eq!(schema.get("other").unwrap().name, "renamed");
    }

    #[test]
    fn test_duplicate_id_rejected_at_finalize() {
        let mut builder = SchemaBuilder::named("DupId");
        builder.declare_field("a", options(1));
        builder.declare_field("b", options(1));

        let err = builder.finalize().unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Violation(SchemaViolation::DuplicateFieldId { id: 1, .. })
        ));
    }

    #[test]
    fn test_redeclared_key_replaces_not_duplicates() {
        let mut builder = SchemaBuilder::named("Redeclare");
        let mut first = options(1);
        first.required = true;
        builder.declare_field("x", first);
        builder.declare_field("x", options(5));

        let schema = builder.finalize().unwrap();
        assert_eq!(schema.items().len(), 1);
        let x = schema.descriptor().get("x").unwrap();
        assert_eq!(x.id, 5);
        // Full replacement: the earlier required flag does not survive
        assert_eq!(x.rule, None);
    }

    #[test]
    fn test_inheritance_isolation() {
        let mut parent = SchemaBuilder::named("ParentA");
        parent.declare_field("x", options(1));
        let parent = parent.finalize().unwrap();

        let mut child = SchemaBuilder::named("ChildA").extending(&parent);
        child.declare_field("y", options(2));
        let child = child.finalize().unwrap();

        // Parent is untouched by the child's declaration
        assert_eq!(parent.items().len(), 1);
        assert!(parent.get("y").is_none());

        // Child sees inherited and own fields, inherited first
        let keys: Vec<_> = child.items().keys().collect();
        assert_eq!(keys, ["x", "y"]);
        assert_eq!(child.descriptor().len(), 2);
    }

    #[test]
    fn test_sibling_isolation() {
        let mut parent = SchemaBuilder::named("ParentB");
        parent.declare_field("x", options(1));
        let parent = parent.finalize().unwrap();

        let mut left = SchemaBuilder::named("LeftB").extending(&parent);
        left.declare_field("l", options(2));
        let left = left.finalize().unwrap();

        let mut right = SchemaBuilder::named("RightB").extending(&parent);
        right.declare_field("r", options(3));
        let right = right.finalize().unwrap();

        assert!(left.get("r").is_none());
        assert!(right.get("l").is_none());
        assert_eq!(parent.items().len(), 1);
    }

    #[test]
    fn test_undeclaring_child_shares_parent_table() {
        let mut parent = SchemaBuilder::named("ParentC");
        parent.declare_field("x", options(1));
        let parent = parent.finalize().unwrap();

        let child = SchemaBuilder::named("ChildC")
            .extending(&parent)
            .finalize()
            .unwrap();

        assert!(Arc::ptr_eq(&child.share_items(), &parent.share_items()));
    }

    #[test]
    fn test_child_redeclares_inherited_key() {
        let mut parent = SchemaBuilder::named("ParentD");
        let mut x = options(1);
        x.required = true;
        parent.declare_field("x", x);
        let parent = parent.finalize().unwrap();

        let mut child = SchemaBuilder::named("ChildD").extending(&parent);
        child.declare_field("x", options(7));
        let child = child.finalize().unwrap();

        assert_eq!(child.get("x").unwrap().id, 7);
        assert!(!child.get("x").unwrap().required);
        // Parent keeps the original declaration
        assert_eq!(parent.get("x").unwrap().id, 1);
        assert!(parent.get("x").unwrap().required);
    }

    #[test]
    fn test_name_precedence_explicit_wins() {
        let schema = SchemaBuilder::for_type::<Plain>()
            .name("Explicit")
            .finalize()
            .unwrap();
        assert_eq!(schema.local_name(), "Explicit");
    }

    #[test]
    fn test_name_from_type_path() {
        let schema = SchemaBuilder::for_type::<Plain>().finalize().unwrap();
        assert_eq!(schema.local_name(), "Plain");
    }

    #[test]
    fn test_resolve_local_name_tiers() {
        // Explicit beats everything
        assert_eq!(
            resolve_local_name(Some("Given"), Some("a::b::Other")).unwrap(),
            "Given"
        );
        // Trailing path identifier
        assert_eq!(
            resolve_local_name(None, Some("a::b::Plain")).unwrap(),
            "Plain"
        );
        // Generic arguments are stripped before taking the tail
        assert_eq!(
            resolve_local_name(None, Some("a::Wrapper<a::b::Inner>")).unwrap(),
            "Wrapper"
        );
        // Last resort: leading identifier of the raw trailing segment
        assert_eq!(
            resolve_local_name(None, Some("a::Odd tail")).unwrap(),
            "Odd"
        );
    }

    #[test]
    fn test_unresolvable_name_fails_at_finalize() {
        // No name source at all
        let err = SchemaBuilder::new().finalize().unwrap_err();
        assert!(matches!(err, SchemaError::UnnamedSchema { type_path: None }));

        // A closure's type path has no leading identifier in its tail
        let err = resolve_local_name(None, Some("a::b::{{closure}}")).unwrap_err();
        assert!(matches!(err, SchemaError::UnnamedSchema { type_path: Some(_) }));
    }
}
