use super::user::SessionUser;

/// Attribute listing, comma-separated, the roles allowed to see an element.
pub const ROLE_VISIBLE_ATTRIBUTE: &str = "data-role-visible";

/// CSS selector for every element carrying [`ROLE_VISIBLE_ATTRIBUTE`].
pub const ROLE_VISIBLE_SELECTOR: &str = "[data-role-visible]";

/// The parts of a page the visibility pass touches.
pub trait PageDocument {
    type Element;

    /// Every element carrying the role allow-list attribute, in document order.
    fn role_marked_elements(&self) -> Vec<Self::Element>;

    /// Raw attribute value of `element`.
    fn role_allowlist(&self, element: &Self::Element) -> Option<String>;

    fn hide(&mut self, element: &Self::Element);
}

/// Whether `role` appears in the comma-separated `allowlist`.
pub fn role_allowed(role: Option<&str>, allowlist: &str) -> bool {
    match role {
        Some(role) => allowlist.split(',').map(str::trim).any(|allowed| allowed == role),
        None => false,
    }
}

/// One pass over the page: hide every marked element whose allow-list does
/// not contain the user's stored role. No user, or a user without a role,
/// hides every marked element. Returns how many elements were hidden.
pub fn apply_role_visibility<D: PageDocument>(user: Option<&SessionUser>, document: &mut D) -> usize {
    let role = user.and_then(SessionUser::role);
    let mut hidden = 0;

    for element in document.role_marked_elements() {
        let allowlist = document.role_allowlist(&element).unwrap_or_default();
        if !role_allowed(role, &allowlist) {
            document.hide(&element);
            hidden += 1;
        }
    }

    tracing::debug!(role = ?role, hidden, "Applied role visibility");
    hidden
}
