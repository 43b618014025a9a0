//! Route redirect policy.
//!
//! Two rules, no state: unauthenticated visitors belong on the sign-in
//! page, authenticated visitors do not. The hosting shell calls
//! [`decide_redirect`] on every page request and follows the answer.

/// The listing page.
pub const HOME_ROUTE: &str = "/";
/// Sign-in page route.
pub const SIGN_IN_ROUTE: &str = "/sign-in";
/// Sign-up page route.
pub const SIGN_UP_ROUTE: &str = "/sign-up";

/// Routes reachable without a session.
pub const PUBLIC_ROUTES: [&str; 2] = [SIGN_IN_ROUTE, SIGN_UP_ROUTE];

/// Whether a route is reachable without a session.
#[must_use]
pub fn is_public(route: &str) -> bool {
    PUBLIC_ROUTES.contains(&route)
}

/// Decide whether the current request must be redirected.
///
/// - unauthenticated on a non-public route: go sign in;
/// - authenticated on a public route: go to the listing;
/// - otherwise stay.
#[must_use]
pub fn decide_redirect(is_authenticated: bool, current_route: &str) -> Option<&'static str> {
    if !is_authenticated && !is_public(current_route) {
        return Some(SIGN_IN_ROUTE);
    }
    if is_authenticated && is_public(current_route) {
        return Some(HOME_ROUTE);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_private_route_redirects_to_sign_in() {
        assert_eq!(decide_redirect(false, "/"), Some(SIGN_IN_ROUTE));
        assert_eq!(decide_redirect(false, "/anything"), Some(SIGN_IN_ROUTE));
    }

    #[test]
    fn test_unauthenticated_public_routes_stay() {
        assert_eq!(decide_redirect(false, "/sign-in"), None);
        assert_eq!(decide_redirect(false, "/sign-up"), None);
    }

    #[test]
    fn test_authenticated_public_routes_redirect_home() {
        assert_eq!(decide_redirect(true, "/sign-in"), Some(HOME_ROUTE));
        assert_eq!(decide_redirect(true, "/sign-up"), Some(HOME_ROUTE));
    }

    #[test]
    fn test_authenticated_private_routes_stay() {
        assert_eq!(decide_redirect(true, "/"), None);
        assert_eq!(decide_redirect(true, "/unknown"), None);
    }

    #[test]
    fn test_public_set_is_exactly_the_two_auth_pages() {
        assert!(is_public("/sign-in"));
        assert!(is_public("/sign-up"));
        assert!(!is_public("/"));
        assert!(!is_public("/sign-in/"));
    }
}
