/// Hash-route dispatch for the vendor app
///
/// Turns a location hash (`#/projects?id=1`, `#/portal/abc`, ...) plus the
/// session's auth flag and current user into:
///
/// - a redirect, when the route is not reachable in the current auth state
/// - the active [`ViewType`] for in-app routes
/// - the [`Screen`] to render, public pages and portals included
///
/// # Rules
///
/// - Unauthenticated on a non-public route: redirect to `#/home`.
/// - Authenticated on `#/login`, `#/home` or `#`: redirect to `#/dashboard`.
/// - The first path segment (query stripped, lowercased) selects the view;
///   an unknown segment keeps the current view.
/// - An in-app view the user may not open renders [`Screen::AccessDenied`].
///
/// # Example
///
/// ```
/// use vena_shared::navigation::{Navigator, Screen, ViewType};
///
/// let mut nav = Navigator::new();
/// let outcome = nav.on_route_change("#/projects", false, None);
/// assert_eq!(outcome.redirect.as_deref(), Some("#/home"));
/// assert_eq!(outcome.screen, Screen::Homepage);
/// ```

use crate::models::user::User;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Route used when the hash is empty
pub const DEFAULT_ROUTE: &str = "#/home";

/// Landing route after login
pub const DASHBOARD_ROUTE: &str = "#/dashboard";

/// Prefixes reachable without a session
const PUBLIC_PREFIXES: [&str; 7] = [
    "#/public",
    "#/feedback",
    "#/suggestion-form",
    "#/revision-form",
    "#/portal",
    "#/freelancer-portal",
    "#/login",
];

/// In-app views, serialized as their route slug
///
/// Deserializing also accepts the display names stored by older clients
/// (`Social Media Planner`, `Freelancer`, ...), see [`ViewType::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewType {
    Home,
    Dashboard,
    Prospek,
    Booking,
    Clients,
    Projects,
    Team,
    Finance,
    Calendar,
    SocialMediaPlanner,
    Packages,
    Assets,
    Contracts,
    PromoCodes,
    Sop,
    ClientReports,
    Settings,
}

impl ViewType {
    pub const ALL: [ViewType; 17] = [
        ViewType::Home,
        ViewType::Dashboard,
        ViewType::Prospek,
        ViewType::Booking,
        ViewType::Clients,
        ViewType::Projects,
        ViewType::Team,
        ViewType::Finance,
        ViewType::Calendar,
        ViewType::SocialMediaPlanner,
        ViewType::Packages,
        ViewType::Assets,
        ViewType::Contracts,
        ViewType::PromoCodes,
        ViewType::Sop,
        ViewType::ClientReports,
        ViewType::Settings,
    ];

    /// Route slug (`social-media-planner`, ...)
    pub fn slug(&self) -> &'static str {
        match self {
            ViewType::Home => "home",
            ViewType::Dashboard => "dashboard",
            ViewType::Prospek => "prospek",
            ViewType::Booking => "booking",
            ViewType::Clients => "clients",
            ViewType::Projects => "projects",
            ViewType::Team => "team",
            ViewType::Finance => "finance",
            ViewType::Calendar => "calendar",
            ViewType::SocialMediaPlanner => "social-media-planner",
            ViewType::Packages => "packages",
            ViewType::Assets => "assets",
            ViewType::Contracts => "contracts",
            ViewType::PromoCodes => "promo-codes",
            ViewType::Sop => "sop",
            ViewType::ClientReports => "client-reports",
            ViewType::Settings => "settings",
        }
    }

    /// Parses a route slug, case-insensitively
    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.to_lowercase();
        ViewType::ALL.into_iter().find(|view| view.slug() == slug)
    }

    /// Resolves a slug or display name
    ///
    /// Display names are lowercased and hyphenated before the slug lookup.
    /// `Freelancer` is the display name of [`ViewType::Team`].
    pub fn resolve(name: &str) -> Option<Self> {
        let slug = name.trim().to_lowercase().replace(' ', "-");
        match slug.as_str() {
            "freelancer" | "freelancers" => Some(ViewType::Team),
            _ => ViewType::from_slug(&slug),
        }
    }

    /// Hash route for this view
    pub fn route(&self) -> String {
        format!("#/{}", self.slug())
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for ViewType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        ViewType::resolve(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown view '{}'", name)))
    }
}

/// Reads an optional view, dropping names no view answers to
pub fn lenient_view<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ViewType>, D::Error> {
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.and_then(|name| {
        let view = ViewType::resolve(&name);
        if view.is_none() {
            tracing::warn!(view = %name, "Ignoring unknown view");
        }
        view
    }))
}

/// Reads an optional view list, dropping names no view answers to
pub fn lenient_views<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<ViewType>>, D::Error> {
    let names = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(names.map(|names| {
        names
            .iter()
            .filter_map(|name| {
                let view = ViewType::resolve(name);
                if view.is_none() {
                    tracing::warn!(view = %name, "Ignoring unknown permission");
                }
                view
            })
            .collect()
    }))
}

/// What to render for a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "kebab-case")]
pub enum Screen {
    Homepage,
    Login,
    PublicPackages,
    PublicBooking,
    PublicLeadForm,
    Feedback,
    SuggestionForm,
    RevisionForm,
    ClientPortal { access_id: String },
    FreelancerPortal { access_id: String },
    App { view: ViewType },
    AccessDenied { view: ViewType },
}

/// Result of one route change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteOutcome {
    /// Route to replace the current one with, if any
    pub redirect: Option<String>,

    /// Active view after the change
    pub view: ViewType,

    /// Screen for the effective route
    pub screen: Screen,
}

/// Whether `route` may be visited without a session
pub fn is_public_route(route: &str) -> bool {
    PUBLIC_PREFIXES.iter().any(|prefix| route.starts_with(prefix))
        || route == DEFAULT_ROUTE
        || route == "#"
}

/// Redirect demanded by the auth state, if any
pub fn redirect_for(route: &str, authenticated: bool) -> Option<&'static str> {
    if !authenticated {
        (!is_public_route(route)).then_some(DEFAULT_ROUTE)
    } else {
        let landing = route.starts_with("#/login") || route == DEFAULT_ROUTE || route == "#";
        landing.then_some(DASHBOARD_ROUTE)
    }
}

/// View selected by the first path segment, or `current` when unknown
pub fn resolve_view(route: &str, current: ViewType) -> ViewType {
    let path = route.split('?').next().unwrap_or_default();
    let segment = path
        .split('/')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .unwrap_or("home");

    ViewType::from_slug(segment).unwrap_or(current)
}

/// Whether `user` may open `view`; no user means no access
pub fn has_permission(user: Option<&User>, view: ViewType) -> bool {
    user.is_some_and(|user| user.can_view(view))
}

/// Access id following `marker` in a portal route
fn access_id_after(route: &str, marker: &str) -> Option<String> {
    route
        .strip_prefix(marker)
        .map(|rest| rest.split('?').next().unwrap_or_default().to_string())
}

/// Screen for an effective (post-redirect) route
pub fn screen_for(
    route: &str,
    authenticated: bool,
    user: Option<&User>,
    view: ViewType,
) -> Screen {
    if route.starts_with("#/home") || route == "#/" {
        return Screen::Homepage;
    }
    if route.starts_with("#/login") {
        return Screen::Login;
    }
    if route.starts_with("#/public-packages") {
        return Screen::PublicPackages;
    }
    if route.starts_with("#/public-booking") {
        return Screen::PublicBooking;
    }
    if route.starts_with("#/public-lead-form") {
        return Screen::PublicLeadForm;
    }
    if route.starts_with("#/feedback") {
        return Screen::Feedback;
    }
    if route.starts_with("#/suggestion-form") {
        return Screen::SuggestionForm;
    }
    if route.starts_with("#/revision-form") {
        return Screen::RevisionForm;
    }
    if let Some(access_id) = access_id_after(route, "#/portal/") {
        return Screen::ClientPortal { access_id };
    }
    if let Some(access_id) = access_id_after(route, "#/freelancer-portal/") {
        return Screen::FreelancerPortal { access_id };
    }
    if !authenticated {
        return Screen::Login;
    }

    if has_permission(user, view) {
        Screen::App { view }
    } else {
        Screen::AccessDenied { view }
    }
}

/// Route state machine for one session
#[derive(Debug, Clone)]
pub struct Navigator {
    route: String,
    view: ViewType,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Navigator {
            route: DEFAULT_ROUTE.to_string(),
            view: ViewType::Home,
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn view(&self) -> ViewType {
        self.view
    }

    /// Applies a hash change and returns what to do with it
    ///
    /// An empty hash is treated as [`DEFAULT_ROUTE`]. When a redirect is
    /// returned, the view and screen already reflect the redirect target.
    pub fn on_route_change(
        &mut self,
        route: &str,
        authenticated: bool,
        user: Option<&User>,
    ) -> RouteOutcome {
        let requested = if route.is_empty() { DEFAULT_ROUTE } else { route };
        let redirect = redirect_for(requested, authenticated).map(str::to_string);
        let effective = redirect.as_deref().unwrap_or(requested);

        self.route = effective.to_string();
        self.view = resolve_view(effective, self.view);

        let screen = screen_for(effective, authenticated, user, self.view);
        tracing::debug!(route = requested, effective, view = %self.view, "Route changed");

        RouteOutcome {
            redirect,
            view: self.view,
            screen,
        }
    }

    /// Navigates to an in-app view and returns the new route
    pub fn navigate(&mut self, view: ViewType) -> String {
        self.route = view.route();
        self.view = view;
        self.route.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;

    fn admin() -> User {
        User {
            id: "u-1".to_string(),
            email: "admin@vena.test".to_string(),
            full_name: "Admin".to_string(),
            role: UserRole::Admin,
            permissions: None,
        }
    }

    fn member(permissions: Vec<ViewType>) -> User {
        User {
            role: UserRole::Member,
            permissions: Some(permissions),
            ..admin()
        }
    }

    #[test]
    fn test_slugs_round_trip() {
        for view in ViewType::ALL {
            assert_eq!(ViewType::from_slug(view.slug()), Some(view));
            let json = serde_json::to_value(view).unwrap();
            assert_eq!(json, serde_json::json!(view.slug()));
        }
        assert_eq!(ViewType::from_slug("Promo-Codes"), Some(ViewType::PromoCodes));
        assert_eq!(ViewType::from_slug("unknown"), None);
    }

    #[test]
    fn test_display_names_resolve() {
        assert_eq!(ViewType::resolve("Social Media Planner"), Some(ViewType::SocialMediaPlanner));
        assert_eq!(ViewType::resolve("Promo Codes"), Some(ViewType::PromoCodes));
        assert_eq!(ViewType::resolve("SOP"), Some(ViewType::Sop));
        assert_eq!(ViewType::resolve("Freelancer"), Some(ViewType::Team));
        assert_eq!(ViewType::resolve("team"), Some(ViewType::Team));
        assert_eq!(ViewType::resolve("Gallery"), None);

        let view: ViewType = serde_json::from_value(serde_json::json!("Client Reports")).unwrap();
        assert_eq!(view, ViewType::ClientReports);
        assert!(serde_json::from_value::<ViewType>(serde_json::json!("Gallery")).is_err());
    }

    #[test]
    fn test_public_routes() {
        assert!(is_public_route("#/public-packages"));
        assert!(is_public_route("#/portal/abc"));
        assert!(is_public_route("#/login"));
        assert!(is_public_route("#/home"));
        assert!(is_public_route("#"));
        assert!(!is_public_route("#/dashboard"));
        assert!(!is_public_route("#/home/extra"));
    }

    #[test]
    fn test_redirects() {
        assert_eq!(redirect_for("#/projects", false), Some("#/home"));
        assert_eq!(redirect_for("#/feedback", false), None);
        assert_eq!(redirect_for("#/login", true), Some("#/dashboard"));
        assert_eq!(redirect_for("#", true), Some("#/dashboard"));
        assert_eq!(redirect_for("#/projects", true), None);
        assert_eq!(redirect_for("#/portal/abc", true), None);
    }

    #[test]
    fn test_resolve_view() {
        assert_eq!(resolve_view("#/projects?id=1", ViewType::Home), ViewType::Projects);
        assert_eq!(resolve_view("#/CLIENTS", ViewType::Home), ViewType::Clients);
        assert_eq!(resolve_view("#/", ViewType::Finance), ViewType::Home);
        assert_eq!(resolve_view("#", ViewType::Finance), ViewType::Home);
        assert_eq!(resolve_view("#/nowhere", ViewType::Finance), ViewType::Finance);
        assert_eq!(resolve_view("#/portal/abc", ViewType::Team), ViewType::Team);
    }

    #[test]
    fn test_permission_gate() {
        assert!(!has_permission(None, ViewType::Dashboard));
        assert!(has_permission(Some(&admin()), ViewType::Settings));

        let user = member(vec![ViewType::Clients]);
        assert!(has_permission(Some(&user), ViewType::Dashboard));
        assert!(has_permission(Some(&user), ViewType::Clients));
        assert!(!has_permission(Some(&user), ViewType::Finance));
    }

    #[test]
    fn test_portal_screens_expose_access_id() {
        assert_eq!(
            screen_for("#/portal/abc-123", false, None, ViewType::Home),
            Screen::ClientPortal {
                access_id: "abc-123".to_string()
            }
        );
        assert_eq!(
            screen_for("#/freelancer-portal/fl-9?tab=pay", false, None, ViewType::Home),
            Screen::FreelancerPortal {
                access_id: "fl-9".to_string()
            }
        );
    }

    #[test]
    fn test_unauthenticated_app_route_lands_on_homepage() {
        let mut nav = Navigator::new();
        let outcome = nav.on_route_change("#/finance", false, None);
        assert_eq!(outcome.redirect.as_deref(), Some("#/home"));
        assert_eq!(outcome.screen, Screen::Homepage);
        assert_eq!(nav.route(), "#/home");
    }

    #[test]
    fn test_authenticated_login_goes_to_dashboard() {
        let mut nav = Navigator::new();
        let user = admin();
        let outcome = nav.on_route_change("#/login", true, Some(&user));
        assert_eq!(outcome.redirect.as_deref(), Some("#/dashboard"));
        assert_eq!(outcome.view, ViewType::Dashboard);
        assert_eq!(
            outcome.screen,
            Screen::App {
                view: ViewType::Dashboard
            }
        );
    }

    #[test]
    fn test_member_denied_view() {
        let mut nav = Navigator::new();
        let user = member(vec![ViewType::Clients]);
        let outcome = nav.on_route_change("#/finance", true, Some(&user));
        assert!(outcome.redirect.is_none());
        assert_eq!(
            outcome.screen,
            Screen::AccessDenied {
                view: ViewType::Finance
            }
        );
    }

    #[test]
    fn test_empty_hash_defaults_to_home() {
        let mut nav = Navigator::new();
        let outcome = nav.on_route_change("", false, None);
        assert!(outcome.redirect.is_none());
        assert_eq!(outcome.screen, Screen::Homepage);
    }

    #[test]
    fn test_navigate_builds_route() {
        let mut nav = Navigator::new();
        assert_eq!(nav.navigate(ViewType::SocialMediaPlanner), "#/social-media-planner");
        assert_eq!(nav.view(), ViewType::SocialMediaPlanner);
    }
}
