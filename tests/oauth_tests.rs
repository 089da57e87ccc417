use serde_json::json;

use invitechan::SlackError;
use invitechan::api::oauth::{AUTHORIZE_URL, build_authorize_url, credential_from_access_response};
use invitechan::core::config::AppConfig;

fn config(with_oauth: bool) -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "SLACK_APP_SIGNING_SECRET" => Some("s".to_string()),
        "SLACK_APP_CLIENT_ID" if with_oauth => Some("123.456".to_string()),
        "SLACK_APP_CLIENT_SECRET" if with_oauth => Some("shh".to_string()),
        "SLACK_REDIRECT_URL" if with_oauth => Some("https://example.com/auth/callback".to_string()),
        _ => None,
    })
    .unwrap()
}

#[test]
fn test_authorize_url_requests_both_scopes() {
    let url = build_authorize_url(&config(true), "st4te").unwrap();

    assert!(url.starts_with(AUTHORIZE_URL));
    assert!(url.contains("client_id=123.456"));
    assert!(url.contains("scope=commands%2Cchannels%3Aread"));
    assert!(url.contains("user_scope=channels%3Awrite"));
    assert!(url.contains("redirect_uri=https%3A%2F%2Fexample%2Ecom%2Fauth%2Fcallback"));
    assert!(url.ends_with("state=st4te"));
}

#[test]
fn test_authorize_url_needs_configuration() {
    assert!(matches!(
        build_authorize_url(&config(false), "s"),
        Err(SlackError::GeneralError(_))
    ));
}

#[test]
fn test_credential_from_access_response() {
    let body = json!({
        "ok": true,
        "access_token": "xoxb-bot",
        "token_type": "bot",
        "scope": "commands,channels:read",
        "team": { "id": "T9", "name": "Acme" },
        "authed_user": { "id": "U1", "scope": "channels:write", "access_token": "xoxp-user" }
    });

    let (team_id, credential) = credential_from_access_response(&body).unwrap();

    assert_eq!(team_id, "T9");
    assert_eq!(credential.bot_token.expose(), "xoxb-bot");
    assert_eq!(credential.user_token.expose(), "xoxp-user");
}

#[test]
fn test_access_response_errors() {
    let err = credential_from_access_response(&json!({"ok": false, "error": "invalid_code"}))
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to access Slack API: oauth error: invalid_code");

    // Installed without the user scope.
    let err = credential_from_access_response(&json!({
        "ok": true,
        "access_token": "xoxb-bot",
        "team": { "id": "T9" },
        "authed_user": { "id": "U1" }
    }))
    .unwrap_err();
    assert!(matches!(err, SlackError::ParseError(msg) if msg.contains("authed_user.access_token")));
}
