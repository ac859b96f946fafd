//! Derived staffing flags.
//!
//! `is_filled` on a role and `is_fully_staffed` on a project are stored
//! denormalized. These helpers are the single source of truth for both flags;
//! every mutation site recomputes through them, inside the same transaction
//! as the mutation.

/// A role is filled when every available slot is taken.
pub fn role_is_filled(slots_filled: i32, slots_available: i32) -> bool {
    slots_filled >= slots_available
}

/// A project is fully staffed when it has at least one role and every role
/// is filled. A project with zero roles is never considered fully staffed,
/// so it stays visible in search until roles exist and are filled.
pub fn project_fully_staffed<I>(roles_filled: I) -> bool
where
    I: IntoIterator<Item = bool>,
{
    let mut any = false;
    for filled in roles_filled {
        if !filled {
            return false;
        }
        any = true;
    }
    any
}
