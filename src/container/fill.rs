//! Field-by-field population of records.
//!
//! A record lists its fields in declaration order. Each field carries a
//! name, a visibility flag and an optional wiring tag of the form
//! `"token,ignore"`:
//!
//! - a non-empty text before the first comma names the token to resolve
//!   the field from; otherwise the field's type is resolved
//! - the field is skipped when the text after the first comma is exactly
//!   `ignore`
//! - private fields are always skipped

use std::any::Any;
use std::fmt;

use super::slot::Slot;
use crate::error::DiResult;

/// A record whose public fields the container can populate.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use wiring::{ContainerExt, Field, Record, WireContainer};
///
/// #[derive(Default)]
/// struct Handler {
///     database_url: String,
///     port: u16,
///     cache: Option<Arc<Vec<u8>>>,
///     requests: u64,
/// }
///
/// impl Record for Handler {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![
///             Field::public("database_url", &mut self.database_url).tag("db_url"),
///             Field::public("port", &mut self.port),
///             Field::public("cache", &mut self.cache).tag(",ignore"),
///             Field::private("requests", &mut self.requests),
///         ]
///     }
/// }
///
/// let container = WireContainer::new();
/// container.singleton_token("db_url", || "postgres://localhost".to_string()).unwrap();
/// container.singleton(|| 8080u16).unwrap();
///
/// let mut handler = Handler::default();
/// container.fill(&mut handler).unwrap();
/// assert_eq!(handler.database_url, "postgres://localhost");
/// assert_eq!(handler.port, 8080);
/// assert!(handler.cache.is_none());
/// ```
pub trait Record: Any {
    /// Fields in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// One field of a [`Record`].
pub struct Field<'a> {
    name: &'static str,
    public: bool,
    tag: &'static str,
    slot: Slot<'a>,
}

impl<'a> Field<'a> {
    pub fn public<T: Any>(name: &'static str, value: &'a mut T) -> Self {
        Self::with_slot(name, Slot::of(value))
    }

    /// A field the container never touches.
    pub fn private<T: Any>(name: &'static str, value: &'a mut T) -> Self {
        Self {
            public: false,
            ..Self::with_slot(name, Slot::of(value))
        }
    }

    /// A public field backed by an arbitrary destination.
    pub fn with_slot(name: &'static str, slot: Slot<'a>) -> Self {
        Self {
            name,
            public: true,
            tag: "",
            slot,
        }
    }

    /// Sets the wiring tag, `"token"`, `",ignore"` or `"token,ignore"`.
    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn directive(&self) -> Directive<'static> {
        Directive::parse(self.tag)
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("public", &self.public)
            .field("tag", &self.tag)
            .field("slot", &self.slot)
            .finish()
    }
}

/// Parsed wiring tag.
///
/// # Examples
///
/// ```rust
/// use wiring::Directive;
///
/// let directive = Directive::parse("db_url");
/// assert_eq!(directive.token(), Some("db_url"));
/// assert!(!directive.is_ignored());
///
/// assert!(Directive::parse(",ignore").is_ignored());
/// assert!(!Directive::parse("ignore").is_ignored());
/// assert_eq!(Directive::parse("").token(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'t> {
    token: Option<&'t str>,
    ignored: bool,
}

impl<'t> Directive<'t> {
    pub fn parse(tag: &'t str) -> Self {
        let (token, option) = match tag.split_once(',') {
            Some((token, option)) => (token, Some(option)),
            None => (tag, None),
        };
        Self {
            token: (!token.is_empty()).then_some(token),
            ignored: option == Some("ignore"),
        }
    }

    pub fn token(&self) -> Option<&'t str> {
        self.token
    }

    pub fn is_ignored(&self) -> bool {
        self.ignored
    }
}

/// Resolves every eligible field of `record` through `resolve`.
///
/// `resolve` receives the field's token (`None` for type resolution) and
/// its destination. The first failure stops the walk and is reported
/// against the field's name.
pub(crate) fn fill_fields<F>(record: &mut dyn Record, mut resolve: F) -> DiResult<()>
where
    F: FnMut(Option<&str>, &mut Slot<'_>) -> DiResult<()>,
{
    for mut field in record.fields() {
        if !field.public {
            continue;
        }
        let directive = field.directive();
        if directive.is_ignored() {
            continue;
        }
        resolve(directive.token(), &mut field.slot).map_err(|err| err.in_field(field.name))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiError;

    #[derive(Default)]
    struct Sample {
        by_type: u8,
        by_token: String,
        skipped: u16,
        hidden: u32,
        token_but_ignored: i8,
    }

    impl Record for Sample {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::public("by_type", &mut self.by_type),
                Field::public("by_token", &mut self.by_token).tag("name"),
                Field::public("skipped", &mut self.skipped).tag(",ignore"),
                Field::private("hidden", &mut self.hidden),
                Field::public("token_but_ignored", &mut self.token_but_ignored).tag("x,ignore"),
            ]
        }
    }

    #[test]
    fn test_directive_parsing() {
        assert_eq!(Directive::parse(""), Directive { token: None, ignored: false });
        assert_eq!(Directive::parse("tok"), Directive { token: Some("tok"), ignored: false });
        assert_eq!(Directive::parse("tok,ignore"), Directive { token: Some("tok"), ignored: true });
        assert_eq!(Directive::parse(",ignore"), Directive { token: None, ignored: true });
        // only the first comma splits
        assert_eq!(Directive::parse("a,ignore,b"), Directive { token: Some("a"), ignored: false });
        assert_eq!(Directive::parse("a,Ignore"), Directive { token: Some("a"), ignored: false });
        assert_eq!(Directive::parse("a,"), Directive { token: Some("a"), ignored: false });
    }

    #[test]
    fn test_routes_fields_by_directive() {
        let mut sample = Sample::default();
        let mut visited = Vec::new();
        fill_fields(&mut sample, |token, slot| {
            visited.push((token.map(str::to_owned), slot.type_name()));
            Ok(())
        })
        .unwrap();

        assert_eq!(
            visited,
            [(None, "u8"), (Some("name".to_owned()), "alloc::string::String")]
        );
    }

    #[test]
    fn test_failure_names_the_field() {
        let mut sample = Sample::default();
        let err = fill_fields(&mut sample, |token, _| match token {
            Some(token) => Err(DiError::TokenNotSet(token.to_owned())),
            None => Ok(()),
        })
        .unwrap_err();

        assert!(matches!(&err, DiError::Field { field: "by_token", .. }));
        assert!(matches!(err.root(), DiError::TokenNotSet(t) if t == "name"));
    }
}
