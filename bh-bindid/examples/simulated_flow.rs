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

//! Walks through the whole BindID flow against a scripted SDK: the first
//! authentication attempt is canceled by the user, the second one succeeds and
//! the user passport is printed the way the passport table shows it.

use std::sync::atomic::{AtomicBool, Ordering};

use bh_bindid::{
    bh_id_token::{encode_unsigned, json_object},
    AuthenticateScreen, AuthenticationFlow, AuthenticationRequest, AuthenticationResponse,
    BindIdConfig, BindIdSdk, Environment, ExchangeTokenRequest, SdkConfig, SdkError, SdkErrorCode,
    TokenResponse, UiDispatcher,
};
use bherror::Error;

const CLIENT_ID: &str = "bid_demo_client";

/// SDK double which cancels the first authentication and succeeds afterwards.
struct ScriptedSdk {
    canceled_once: AtomicBool,
}

impl BindIdSdk for ScriptedSdk {
    async fn initialize(&self, config: &SdkConfig) -> bherror::Result<(), SdkError> {
        println!(
            "SDK initialized for `{}` on {}",
            config.client_id,
            config.environment.host_name()
        );
        Ok(())
    }

    async fn authenticate(
        &self,
        request: &AuthenticationRequest,
    ) -> bherror::Result<AuthenticationResponse, SdkError> {
        if !self.canceled_once.swap(true, Ordering::SeqCst) {
            return Err(Error::root(SdkError::new(SdkErrorCode::UserCanceled)));
        }
        println!(
            "User authenticated (PKCE: {}, redirect: {})",
            request.use_pkce, request.redirect_uri
        );
        Ok(AuthenticationResponse {
            code: "authorization-code".to_owned(),
            state: None,
        })
    }

    async fn exchange_token(
        &self,
        _request: &ExchangeTokenRequest,
    ) -> bherror::Result<TokenResponse, SdkError> {
        let id_token = encode_unsigned(
            &json_object!({ "alg": "ES256", "typ": "JWT" }),
            &json_object!({
                "iss": "https://signin.bindid-sandbox.io",
                "sub": "abc123",
                "aud": CLIENT_ID,
                "exp": 1700000600,
                "iat": 1700000000,
                "email": "x@example.com",
                "email_verified": true,
                "bindid_network_info": {
                    "device_ip": "203.0.113.7",
                    "user_agent": "BindID Example/1.0"
                }
            }),
            "c2lnbmF0dXJl",
        );

        Ok(TokenResponse {
            id_token,
            access_token: "access-token".to_owned(),
        })
    }
}

fn print_screen(screen: &AuthenticateScreen) {
    if let Some(alert) = screen.alert() {
        println!("[alert] {}: {}", alert.title, alert.message);
    }
    if let Some(table) = screen.passport() {
        println!("[{}]", bh_bindid::presentation::PASSPORT_TITLE);
        for row in 0..table.number_of_rows() {
            let cell = table.cell(row);
            println!("  {:<22} {}", cell.label, cell.value);
        }
    }
    println!(
        "[button] enabled={} title={:?}",
        screen.button().is_enabled(),
        screen.button().title()
    );
}

#[tokio::main]
async fn main() {
    let config = BindIdConfig::new(Environment::Sandbox, CLIENT_ID, "bindidexample://login");
    let sdk = ScriptedSdk {
        canceled_once: AtomicBool::new(false),
    };
    let (dispatcher, mut receiver) = UiDispatcher::channel();
    let mut flow = AuthenticationFlow::new(config, sdk, dispatcher);
    let mut screen = AuthenticateScreen::new();

    flow.initialize().await.expect("SDK initialization failed");
    screen.drain(&mut receiver);
    print_screen(&screen);

    // The user cancels the first attempt
    let canceled = flow.authenticate().await;
    assert!(canceled.is_err());
    screen.drain(&mut receiver);
    print_screen(&screen);
    screen.dismiss_alert();

    // ... and tries again
    let user = flow.authenticate().await.expect("authentication failed");
    println!("Access token received: {}", !user.access_token().is_empty());
    screen.drain(&mut receiver);
    print_screen(&screen);

    flow.dismiss().expect("passport is displayed");
    screen.drain(&mut receiver);
    assert!(screen.passport().is_none());
}
