use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::models::preferences::Theme;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeBody {
    pub theme: Theme,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingBody {
    pub onboarding_seen: bool,
}

/// GET /api/v1/preferences/theme
pub async fn handle_get_theme(State(state): State<AppState>) -> Json<ThemeBody> {
    Json(ThemeBody {
        theme: state.session.theme().await,
    })
}

/// PUT /api/v1/preferences/theme
pub async fn handle_put_theme(
    State(state): State<AppState>,
    Json(body): Json<ThemeBody>,
) -> Json<ThemeBody> {
    Json(ThemeBody {
        theme: state.session.set_theme(body.theme).await,
    })
}

/// POST /api/v1/preferences/theme/toggle
pub async fn handle_toggle_theme(State(state): State<AppState>) -> Json<ThemeBody> {
    Json(ThemeBody {
        theme: state.session.toggle_theme().await,
    })
}

/// GET /api/v1/onboarding
pub async fn handle_get_onboarding(State(state): State<AppState>) -> Json<OnboardingBody> {
    Json(OnboardingBody {
        onboarding_seen: state.session.onboarding_seen(),
    })
}

/// POST /api/v1/onboarding/dismiss
pub async fn handle_dismiss_onboarding(State(state): State<AppState>) -> Json<OnboardingBody> {
    state.session.dismiss_onboarding().await;
    Json(OnboardingBody {
        onboarding_seen: true,
    })
}
