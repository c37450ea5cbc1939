//! Permission seam: the `User` trait and permission specifications.
//!
//! Button visibility, panel visibility, and the download endpoint all
//! delegate to a [`PermissionSpec`], which is resolved against the current
//! user and the entity being operated on. The host framework supplies the
//! [`User`] implementation; [`SimpleUser`] covers tests and small
//! deployments.

use crate::content::ContentItem;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Baseline permission required for any admin-surface access,
/// including file downloads.
pub const ADMIN_ACCESS_PERMISSION: &str = "admin.access_admin";

/// A user that permission checks can be resolved against.
///
/// Superusers pass every check. Permission strings follow the
/// `"app_label.permission_name"` convention.
pub trait User: Send + Sync {
	/// The user's login name
	fn username(&self) -> &str;

	/// Whether this user bypasses all permission checks
	fn is_superuser(&self) -> bool {
		false
	}

	/// All permission strings granted to this user
	fn permissions(&self) -> HashSet<String>;

	/// Checks if this user has a specific permission
	fn has_perm(&self, perm: &str) -> bool {
		if self.is_superuser() {
			return true;
		}
		self.permissions().contains(perm)
	}

	/// Checks if this user has all of the specified permissions
	fn has_perms(&self, perms: &[&str]) -> bool {
		if self.is_superuser() {
			return true;
		}
		let all_perms = self.permissions();
		perms.iter().all(|p| all_perms.contains(*p))
	}
}

/// In-memory user with an explicit permission set.
///
/// # Examples
///
/// ```
/// use cms_panels::permissions::{SimpleUser, User};
///
/// let editor = SimpleUser::new("editor").with_permission("admin.access_admin");
/// assert!(editor.has_perm("admin.access_admin"));
/// assert!(!editor.has_perm("reports.export"));
///
/// let root = SimpleUser::superuser("root");
/// assert!(root.has_perm("reports.export"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimpleUser {
	username: String,
	is_superuser: bool,
	permissions: HashSet<String>,
}

impl SimpleUser {
	/// Create a user with no permissions
	pub fn new(username: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			is_superuser: false,
			permissions: HashSet::new(),
		}
	}

	/// Create a superuser
	pub fn superuser(username: impl Into<String>) -> Self {
		Self {
			is_superuser: true,
			..Self::new(username)
		}
	}

	/// Grant a permission
	pub fn with_permission(mut self, perm: impl Into<String>) -> Self {
		self.permissions.insert(perm.into());
		self
	}
}

impl User for SimpleUser {
	fn username(&self) -> &str {
		&self.username
	}

	fn is_superuser(&self) -> bool {
		self.is_superuser
	}

	fn permissions(&self) -> HashSet<String> {
		self.permissions.clone()
	}
}

/// Context a permission specification is resolved against
pub struct PermissionContext<'a> {
	/// The current user
	pub user: &'a dyn User,
	/// The entity being operated on
	pub item: &'a dyn ContentItem,
}

/// Callable form of a permission check
pub type PermissionPredicate = Arc<dyn Fn(&PermissionContext<'_>) -> bool + Send + Sync>;

/// Declarative permission requirement.
///
/// Replaces the loosely-typed "None, string, list, or callable" convention
/// with an explicit tagged variant, so malformed configurations are
/// unrepresentable.
#[derive(Clone)]
pub enum PermissionSpec {
	/// No restriction
	AllowAny,
	/// A single required permission string
	Permission(String),
	/// All of the listed permission strings are required
	AllOf(Vec<String>),
	/// An arbitrary predicate over (user, entity)
	Custom(PermissionPredicate),
}

impl PermissionSpec {
	/// Require a single permission string
	pub fn permission(perm: impl Into<String>) -> Self {
		Self::Permission(perm.into())
	}

	/// Require all of the given permission strings
	pub fn all_of<I, S>(perms: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::AllOf(perms.into_iter().map(Into::into).collect())
	}

	/// Require an arbitrary predicate to pass
	pub fn custom<F>(predicate: F) -> Self
	where
		F: Fn(&PermissionContext<'_>) -> bool + Send + Sync + 'static,
	{
		Self::Custom(Arc::new(predicate))
	}

	/// Resolve this specification against a context
	///
	/// # Examples
	///
	/// ```
	/// use cms_panels::permissions::{PermissionContext, PermissionSpec, SimpleUser};
	/// # use cms_panels::content::{ContentItem, FieldValue};
	/// # use uuid::Uuid;
	/// # struct Doc;
	/// # impl ContentItem for Doc {
	/// #     fn content_type(&self) -> &str { "docs.doc" }
	/// #     fn object_id(&self) -> Option<Uuid> { None }
	/// #     fn field(&self, _name: &str) -> Option<FieldValue> { None }
	/// # }
	/// let user = SimpleUser::new("editor").with_permission("docs.view");
	/// let doc = Doc;
	/// let ctx = PermissionContext { user: &user, item: &doc };
	///
	/// assert!(PermissionSpec::AllowAny.check(&ctx));
	/// assert!(PermissionSpec::permission("docs.view").check(&ctx));
	/// assert!(!PermissionSpec::all_of(["docs.view", "docs.export"]).check(&ctx));
	/// ```
	pub fn check(&self, ctx: &PermissionContext<'_>) -> bool {
		match self {
			Self::AllowAny => true,
			Self::Permission(perm) => ctx.user.has_perm(perm),
			Self::AllOf(perms) => {
				let refs: Vec<&str> = perms.iter().map(String::as_str).collect();
				ctx.user.has_perms(&refs)
			}
			Self::Custom(predicate) => predicate(ctx),
		}
	}
}

impl fmt::Debug for PermissionSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::AllowAny => write!(f, "AllowAny"),
			Self::Permission(perm) => write!(f, "Permission({:?})", perm),
			Self::AllOf(perms) => write!(f, "AllOf({:?})", perms),
			Self::Custom(_) => write!(f, "Custom(..)"),
		}
	}
}
