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

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use bh_id_token::{encode_unsigned, json_object, JsonObject};
use bherror::Error;

use crate::{
    config::{BindIdConfig, Environment},
    sdk::{
        AuthenticationRequest, AuthenticationResponse, BindIdSdk, ExchangeTokenRequest, SdkConfig,
        SdkError, TokenResponse,
    },
};

pub(crate) const CLIENT_ID: &str = "bid_demo_client";
pub(crate) const REDIRECT_URI: &str = "bindidexample://login";
pub(crate) const ACCESS_TOKEN: &str = "access-token";

pub(crate) fn config() -> BindIdConfig {
    BindIdConfig::new(Environment::Sandbox, CLIENT_ID, REDIRECT_URI)
}

/// Builds an unsigned compact ID token carrying the `claims`.
pub(crate) fn id_token(claims: JsonObject) -> String {
    encode_unsigned(
        &json_object!({ "alg": "ES256", "typ": "JWT" }),
        &claims,
        "c2lnbmF0dXJl",
    )
}

pub(crate) fn user_claims() -> JsonObject {
    json_object!({
        "sub": "abc123",
        "aud": CLIENT_ID,
        "iss": "https://signin.bindid-sandbox.io",
        "email": "x@example.com",
        "bindid_network_info": { "device_ip": "203.0.113.7" },
        "custom_claim": "not displayed"
    })
}

/// An SDK call as recorded by the [`FakeSdk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SdkCall {
    Initialize(SdkConfig),
    Authenticate(AuthenticationRequest),
    ExchangeToken(ExchangeTokenRequest),
}

/// Fake SDK returning canned responses.
///
/// Every call succeeds unless a failure was queued for it.  Successful token
/// exchanges return the configured ID token.  A stalled call never completes,
/// only the first call of its kind stalls.
pub(crate) struct FakeSdk {
    id_token: String,
    stall_initialize: AtomicBool,
    stall_authenticate: AtomicBool,
    initialize_failures: Mutex<VecDeque<SdkError>>,
    authenticate_failures: Mutex<VecDeque<SdkError>>,
    exchange_failures: Mutex<VecDeque<SdkError>>,
    calls: Mutex<Vec<SdkCall>>,
}

impl FakeSdk {
    pub(crate) fn new(id_token: impl Into<String>) -> Self {
        Self {
            id_token: id_token.into(),
            stall_initialize: AtomicBool::new(false),
            stall_authenticate: AtomicBool::new(false),
            initialize_failures: Mutex::default(),
            authenticate_failures: Mutex::default(),
            exchange_failures: Mutex::default(),
            calls: Mutex::default(),
        }
    }

    pub(crate) fn failing_initialize(self, error: SdkError) -> Self {
        self.initialize_failures.lock().unwrap().push_back(error);
        self
    }

    pub(crate) fn failing_authenticate(self, error: SdkError) -> Self {
        self.authenticate_failures.lock().unwrap().push_back(error);
        self
    }

    pub(crate) fn failing_exchange(self, error: SdkError) -> Self {
        self.exchange_failures.lock().unwrap().push_back(error);
        self
    }

    pub(crate) fn stalling_initialize(self) -> Self {
        self.stall_initialize.store(true, Ordering::SeqCst);
        self
    }

    pub(crate) fn stalling_authenticate(self) -> Self {
        self.stall_authenticate.store(true, Ordering::SeqCst);
        self
    }

    pub(crate) fn calls(&self) -> Vec<SdkCall> {
        self.calls.lock().unwrap().clone()
    }

    fn respond<T>(
        &self,
        call: SdkCall,
        failures: &Mutex<VecDeque<SdkError>>,
        success: impl FnOnce() -> T,
    ) -> bherror::Result<T, SdkError> {
        self.calls.lock().unwrap().push(call);
        let failure = failures.lock().unwrap().pop_front();
        match failure {
            Some(error) => Err(Error::root(error)),
            None => Ok(success()),
        }
    }
}

impl BindIdSdk for FakeSdk {
    async fn initialize(&self, config: &SdkConfig) -> bherror::Result<(), SdkError> {
        if self.stall_initialize.swap(false, Ordering::SeqCst) {
            futures::future::pending::<()>().await;
        }
        self.respond(
            SdkCall::Initialize(config.clone()),
            &self.initialize_failures,
            || (),
        )
    }

    async fn authenticate(
        &self,
        request: &AuthenticationRequest,
    ) -> bherror::Result<AuthenticationResponse, SdkError> {
        if self.stall_authenticate.swap(false, Ordering::SeqCst) {
            futures::future::pending::<()>().await;
        }
        self.respond(
            SdkCall::Authenticate(request.clone()),
            &self.authenticate_failures,
            || AuthenticationResponse {
                code: "authorization-code".to_owned(),
                state: None,
            },
        )
    }

    async fn exchange_token(
        &self,
        request: &ExchangeTokenRequest,
    ) -> bherror::Result<TokenResponse, SdkError> {
        self.respond(
            SdkCall::ExchangeToken(request.clone()),
            &self.exchange_failures,
            || TokenResponse {
                id_token: self.id_token.clone(),
                access_token: ACCESS_TOKEN.to_owned(),
            },
        )
    }
}
