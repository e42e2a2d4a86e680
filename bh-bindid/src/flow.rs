// Copyright (C) 2020-2026  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The authentication flow state machine.
//!
//! The flow only sequences the SDK calls; the protocol itself (PKCE request
//! construction, code exchange) is done by the SDK:
//!
//! ```text
//! Uninitialized -> Initializing -> Ready -> Authenticating -> Exchanging -> Validating -> Displaying
//! ```
//!
//! Any failing step moves the flow to [`FlowState::Error`] and presents an
//! alert.  Nothing is retried automatically; the user re-triggers the action.
//! A step whose future is dropped before completion also ends in
//! [`FlowState::Error`], without an alert.

use bh_id_token::{
    decode_header, decode_payload, ClaimSet, IdTokenValidator, StructuralValidator, UserPassport,
};
use bherror::{traits::PropagateError as _, Error};

use crate::{
    config::BindIdConfig,
    dispatch::{UiDispatcher, UiEvent},
    presentation::Alert,
    sdk::{AuthenticationRequest, BindIdSdk, ExchangeTokenRequest, SdkConfig, TokenResponse},
    FlowError, Result,
};

/// State of the [`AuthenticationFlow`].
#[derive(strum_macros::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// The SDK has not been initialized yet.
    Uninitialized,
    /// The SDK is being initialized.
    Initializing,
    /// Authentication can be triggered.
    Ready,
    /// Waiting for the user to authenticate.
    Authenticating,
    /// Exchanging the authorization response for tokens.
    Exchanging,
    /// Validating the received ID token.
    Validating,
    /// The claims of the authenticated user are displayed.
    Displaying,
    /// The last step failed and an alert was presented.
    Error,
}

/// Outcome of a successful authentication.
///
/// Held only while the passport is displayed and never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    id_token: String,
    access_token: String,
    passport: UserPassport,
}

impl AuthenticatedUser {
    /// The ID token in the JWS Compact Serialization.
    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    /// The access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The displayed claims.
    pub fn passport(&self) -> &UserPassport {
        &self.passport
    }
}

impl std::fmt::Debug for AuthenticatedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedUser")
            .field("passport", &self.passport)
            .finish_non_exhaustive()
    }
}

/// Drives the BindID SDK through initialization, authentication, token
/// exchange and ID token validation.
///
/// Only one flow runs at a time; every action takes `&mut self`.
pub struct AuthenticationFlow<S, V = StructuralValidator> {
    config: BindIdConfig,
    sdk: S,
    validator: V,
    claims: ClaimSet,
    dispatcher: UiDispatcher,
    state: FlowState,
    initialized: bool,
    user: Option<AuthenticatedUser>,
    last_alert: Option<Alert>,
}

impl<S: BindIdSdk> AuthenticationFlow<S> {
    /// Creates a flow displaying the default [`ClaimSet`].
    ///
    /// The ID token is required to be addressed to the configured client and
    /// issued by the configured environment.
    pub fn new(config: BindIdConfig, sdk: S, dispatcher: UiDispatcher) -> Self {
        let validator = StructuralValidator::new()
            .expecting_audience(config.client_id.clone())
            .expecting_issuer(config.environment.issuer());
        Self {
            config,
            sdk,
            validator,
            claims: ClaimSet::default(),
            dispatcher,
            state: FlowState::Uninitialized,
            initialized: false,
            user: None,
            last_alert: None,
        }
    }
}

impl<S, V> AuthenticationFlow<S, V> {
    /// Replaces the ID token validator.
    pub fn with_validator<W: IdTokenValidator>(self, validator: W) -> AuthenticationFlow<S, W> {
        AuthenticationFlow {
            config: self.config,
            sdk: self.sdk,
            validator,
            claims: self.claims,
            dispatcher: self.dispatcher,
            state: self.state,
            initialized: self.initialized,
            user: self.user,
            last_alert: self.last_alert,
        }
    }

    /// Replaces the table of displayed claims.
    pub fn with_claims(mut self, claims: ClaimSet) -> Self {
        self.claims = claims;
        self
    }

    /// The current state.
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// The configuration the flow was created with.
    pub fn config(&self) -> &BindIdConfig {
        &self.config
    }

    /// The authenticated user, while [`FlowState::Displaying`].
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    /// The alert presented for the last failure, cleared when an action is
    /// triggered again.
    pub fn last_alert(&self) -> Option<&Alert> {
        self.last_alert.as_ref()
    }

    /// Whether [`Self::authenticate`] may be triggered.
    pub fn can_authenticate(&self) -> bool {
        self.initialized && matches!(self.state, FlowState::Ready | FlowState::Error)
    }

    fn transition(&mut self, state: FlowState) {
        tracing::debug!(from = %self.state, to = %state, "authentication flow transition");
        self.state = state;
    }

    fn fail<T>(&mut self, error: Error<FlowError>) -> Result<T, FlowError> {
        tracing::warn!(state = %self.state, %error, "authentication flow failed");
        self.transition(FlowState::Error);
        self.user = None;

        if let Some(alert) = error.error.alert() {
            self.last_alert = Some(alert.clone());
            self.dispatcher.deliver(UiEvent::ShowAlert(alert));
        }
        // the trigger stays disabled until the SDK is initialized
        if self.initialized {
            self.dispatcher.deliver(UiEvent::SetLoading(false));
        }

        Err(error)
    }
}

impl<S, V> AuthenticationFlow<S, V>
where
    S: BindIdSdk,
    V: IdTokenValidator,
{
    /// Initializes the SDK with the configured environment and client ID.
    ///
    /// Calling it again after a failure retries the initialization; calling it
    /// once initialized does nothing.
    ///
    /// # Errors
    ///
    /// - [`FlowError::NotReady`] while the passport is displayed,
    /// - [`FlowError::Configuration`] if the configuration is unusable,
    /// - [`FlowError::InitializationFailed`] if the SDK reports an error.
    pub async fn initialize(&mut self) -> Result<(), FlowError> {
        if self.initialized {
            tracing::debug!("BindID SDK is already initialized");
            return Ok(());
        }
        if !matches!(self.state, FlowState::Uninitialized | FlowState::Error) {
            return Err(Error::root(FlowError::NotReady(self.state)));
        }

        self.last_alert = None;
        self.dispatcher.deliver(UiEvent::SetLoading(true));

        let sdk_config = self.config.sdk_config();
        let outcome = {
            let in_flight = InFlight::enter(
                &mut self.state,
                &self.dispatcher,
                FlowState::Initializing,
                false,
            );
            let outcome = initialize_sdk(&self.sdk, &self.config, &sdk_config).await;
            in_flight.finish();
            outcome
        };
        if let Err(error) = outcome {
            return self.fail(error);
        }

        tracing::info!(
            environment = %sdk_config.environment,
            "BindID SDK initialized successfully"
        );
        self.initialized = true;
        self.transition(FlowState::Ready);
        self.dispatcher.deliver(UiEvent::SetLoading(false));

        Ok(())
    }

    /// Authenticates the user, exchanges the response for tokens, validates
    /// the ID token and displays its claims.
    ///
    /// The token exchange is only attempted after a successful authentication,
    /// and the claims are only displayed after a successful validation.
    ///
    /// # Errors
    ///
    /// - [`FlowError::NotReady`] if the SDK is not initialized or the passport
    ///   is displayed,
    /// - [`FlowError::Sdk`] if authentication or the token exchange fails,
    /// - [`FlowError::InvalidIdToken`] if the ID token fails validation.
    pub async fn authenticate(&mut self) -> Result<&AuthenticatedUser, FlowError> {
        if !self.can_authenticate() {
            return Err(Error::root(FlowError::NotReady(self.state)));
        }

        self.last_alert = None;
        self.dispatcher.deliver(UiEvent::SetLoading(true));

        let request = self.config.authentication_request();
        let outcome = {
            let mut in_flight = InFlight::enter(
                &mut self.state,
                &self.dispatcher,
                FlowState::Authenticating,
                true,
            );
            let outcome = obtain_tokens(&self.sdk, &request, &mut in_flight).await;
            in_flight.finish();
            outcome
        };
        let tokens = match outcome {
            Ok(tokens) => tokens,
            Err(error) => return self.fail(error),
        };

        self.transition(FlowState::Validating);
        if let Some(message) = self.validator.validate(&tokens.id_token).into_failure_message() {
            return self.fail(Error::root(FlowError::InvalidIdToken(message)));
        }

        let passport = self.parse_passport(&tokens.id_token);
        self.transition(FlowState::Displaying);
        self.dispatcher.deliver(UiEvent::SetLoading(false));
        self.dispatcher.deliver(UiEvent::ShowPassport(passport.clone()));

        Ok(&*self.user.insert(AuthenticatedUser {
            id_token: tokens.id_token,
            access_token: tokens.access_token,
            passport,
        }))
    }

    /// Dismisses the displayed passport, discarding the tokens.
    ///
    /// # Errors
    ///
    /// [`FlowError::NotReady`] unless the passport is displayed.
    pub fn dismiss(&mut self) -> Result<(), FlowError> {
        if self.state != FlowState::Displaying {
            return Err(Error::root(FlowError::NotReady(self.state)));
        }

        self.user = None;
        self.transition(FlowState::Ready);
        self.dispatcher.deliver(UiEvent::DismissPassport);

        Ok(())
    }

    /// Parses the claims of an already validated ID token.
    ///
    /// A token which cannot be decoded is only logged and yields an empty
    /// passport.
    fn parse_passport(&self, id_token: &str) -> UserPassport {
        if let Ok(header) = decode_header(id_token) {
            tracing::debug!(
                alg = ?header.get("alg"),
                typ = ?header.get("typ"),
                "BindID token header"
            );
        }

        match decode_payload(id_token) {
            Ok(payload) => self.claims.parse(&payload),
            Err(error) => {
                tracing::warn!(%error, "Error decoding BindID token");
                UserPassport::new()
            }
        }
    }
}

async fn initialize_sdk<S: BindIdSdk>(
    sdk: &S,
    config: &BindIdConfig,
    sdk_config: &SdkConfig,
) -> Result<(), FlowError> {
    config
        .validate()
        .match_err(|error| FlowError::Configuration(error.clone()))?;

    sdk.initialize(sdk_config)
        .await
        .match_err(|error| FlowError::InitializationFailed(error.clone()))
}

async fn obtain_tokens<S: BindIdSdk>(
    sdk: &S,
    request: &AuthenticationRequest,
    in_flight: &mut InFlight<'_>,
) -> Result<TokenResponse, FlowError> {
    let response = sdk
        .authenticate(request)
        .await
        .match_err(|error| FlowError::Sdk(error.clone()))?;

    in_flight.transition(FlowState::Exchanging);
    sdk.exchange_token(&ExchangeTokenRequest::from(response))
        .await
        .match_err(|error| FlowError::Sdk(error.clone()))
}

/// Holds the flow in a busy state while an SDK call is pending.
///
/// If the pending future is dropped before [`InFlight::finish`], the flow
/// falls back to [`FlowState::Error`] so the action can be triggered again.
struct InFlight<'a> {
    state: &'a mut FlowState,
    dispatcher: &'a UiDispatcher,
    initialized: bool,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn enter(
        state: &'a mut FlowState,
        dispatcher: &'a UiDispatcher,
        step: FlowState,
        initialized: bool,
    ) -> Self {
        let mut in_flight = Self {
            state,
            dispatcher,
            initialized,
            armed: true,
        };
        in_flight.transition(step);
        in_flight
    }

    fn transition(&mut self, state: FlowState) {
        tracing::debug!(from = %self.state, to = %state, "authentication flow transition");
        *self.state = state;
    }

    fn finish(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        tracing::warn!(state = %self.state, "authentication flow interrupted");
        self.transition(FlowState::Error);
        // the trigger stays disabled until the SDK is initialized
        if self.initialized {
            self.dispatcher.deliver(UiEvent::SetLoading(false));
        }
    }
}
