use crate::auth::{SessionState, UserProfile};

/// What the front-end shows for a given session state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    Loading,
    Dashboard(UserProfile),
    Login,
}

/// Chooses the view for `state`. Pure: no I/O, no side effects.
#[must_use]
pub fn gate(state: &SessionState) -> View {
    if state.loading {
        return View::Loading;
    }

    match (&state.profile, state.is_authenticated) {
        (Some(profile), true) => View::Dashboard(profile.clone()),
        _ => View::Login,
    }
}
