/// The access requirement a route declares to the guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Reachable regardless of session state.
    Public,
    /// Only reachable with an authenticated session.
    RequiresAuth,
    /// Only reachable without one (login, register).
    RequiresGuest,
}

/// The route surface exposed to the navigation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Courses,
    Enrollment,
    MyCourses,
}

impl Route {
    /// The route's path as the navigation layer knows it.
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Courses => "/courses",
            Route::Enrollment => "/enrollment",
            Route::MyCourses => "/my-courses",
        }
    }

    /// The route's access requirement.
    pub fn access(self) -> Access {
        match self {
            Route::Home => Access::Public,
            Route::Login | Route::Register => Access::RequiresGuest,
            Route::Courses | Route::Enrollment | Route::MyCourses => Access::RequiresAuth,
        }
    }

    /// Looks a route up by path.
    pub fn from_path(path: &str) -> Option<Route> {
        match path {
            "/" => Some(Route::Home),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/courses" => Some(Route::Courses),
            "/enrollment" => Some(Route::Enrollment),
            "/my-courses" => Some(Route::MyCourses),
            _ => None,
        }
    }
}

/// Maps router-level redirect entries before guarding ("/" lands on the
/// course catalog).
pub fn resolve(route: Route) -> Route {
    match route {
        Route::Home => Route::Courses,
        other => other,
    }
}

/// The navigation side-effect port.
///
/// The gateway and the application shell redirect through this capability
/// instead of mutating any global location, so tests can substitute a
/// recording stub.
pub trait Navigator: Send + Sync {
    /// The path the user agent is currently on.
    fn current_path(&self) -> String;

    /// Requests navigation to the given path.
    fn redirect(&self, path: &str);
}
