use std::fmt;

/// A screen the navigator knows how to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    SignIn,
    SignUp,
}

impl Route {
    pub fn name(self) -> &'static str {
        match self {
            Route::SignIn => "signin",
            Route::SignUp => "signup",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Imperative navigation handed to whoever drives the screens.
pub trait Navigator {
    /// Show `route`. If it is already on the stack, everything above it is
    /// popped; otherwise it is pushed.
    fn navigate_to(&mut self, route: Route);
    /// Pop the top entry. Returns `false` (and does nothing) at the root.
    fn go_back(&mut self) -> bool;
    fn current(&self) -> Route;
}

#[derive(Debug, Clone)]
pub struct StackNavigator {
    stack: Vec<Route>,
}

impl StackNavigator {
    pub fn new(initial: Route) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    pub fn stack(&self) -> &[Route] {
        &self.stack
    }

    pub fn is_at_root(&self) -> bool {
        self.stack.len() <= 1
    }
}

impl Default for StackNavigator {
    fn default() -> Self {
        Self::new(Route::SignIn)
    }
}

impl Navigator for StackNavigator {
    fn navigate_to(&mut self, route: Route) {
        match self.stack.iter().position(|r| *r == route) {
            Some(idx) => self.stack.truncate(idx + 1),
            None => self.stack.push(route),
        }
    }

    fn go_back(&mut self) -> bool {
        if self.is_at_root() {
            return false;
        }
        self.stack.pop();
        true
    }

    fn current(&self) -> Route {
        // The stack is never emptied: go_back refuses to pop the root.
        self.stack.last().copied().unwrap_or(Route::SignIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_sign_in() {
        let nav = StackNavigator::default();
        assert_eq!(nav.current(), Route::SignIn);
        assert_eq!(nav.stack(), &[Route::SignIn]);
        assert!(nav.is_at_root());
    }

    #[test]
    fn navigate_pushes_new_route() {
        let mut nav = StackNavigator::default();
        nav.navigate_to(Route::SignUp);
        assert_eq!(nav.stack(), &[Route::SignIn, Route::SignUp]);
        assert_eq!(nav.current(), Route::SignUp);
    }

    #[test]
    fn navigate_to_existing_route_pops_back_to_it() {
        let mut nav = StackNavigator::default();
        nav.navigate_to(Route::SignUp);
        nav.navigate_to(Route::SignIn);
        assert_eq!(nav.stack(), &[Route::SignIn]);
    }

    #[test]
    fn navigate_to_current_route_is_noop() {
        let mut nav = StackNavigator::default();
        nav.navigate_to(Route::SignIn);
        assert_eq!(nav.stack(), &[Route::SignIn]);
    }

    #[test]
    fn go_back_pops_one_entry() {
        let mut nav = StackNavigator::default();
        nav.navigate_to(Route::SignUp);
        assert!(nav.go_back());
        assert_eq!(nav.current(), Route::SignIn);
    }

    #[test]
    fn go_back_at_root_does_nothing() {
        let mut nav = StackNavigator::default();
        assert!(!nav.go_back());
        assert_eq!(nav.stack(), &[Route::SignIn]);
    }

    #[test]
    fn routes_display_by_name() {
        assert_eq!(Route::SignIn.to_string(), "signin");
        assert_eq!(Route::SignUp.to_string(), "signup");
    }
}
