//! `autoservice-auth` — route access control over an external identity provider.
//!
//! Pure decisions: nothing here performs IO. The session is supplied by the
//! caller (see [`SessionSource`]) and the guards only read it.

pub mod admin_guard;
pub mod guard;
pub mod paths;
pub mod reactive;
pub mod roles;
pub mod session;

pub use admin_guard::SuperadminGuard;
pub use guard::{
    AccessGuard, GrantedAccess, GuardOutcome, Redirect, RedirectReason, RouteRequirement,
};
pub use paths::RoutePaths;
pub use reactive::SessionHandle;
pub use roles::Role;
pub use session::{AuthUser, Session, SessionSource, TenantClaim, UserMetadata, UserProfile};
