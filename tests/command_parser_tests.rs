use invitechan::core::models::ReplyRoute;
use invitechan::slack::command_parser::{decode_url_component, parse_form_data};

#[test]
fn test_parse_slash_command() {
    let form = "token=gIkuvaNzQIHg97ATvDxqgjtO&team_id=T0001&team_domain=example\
                &channel_id=C2147483705&channel_name=test&user_id=U2147483697\
                &user_name=Steve&command=%2Fplzinviteme&text=join+dev-talk\
                &response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2F1234%2F5678";

    let event = parse_form_data(form).unwrap();

    assert_eq!(event.team_id, "T0001");
    assert_eq!(event.channel_id, "C2147483705");
    assert_eq!(event.user_id, "U2147483697");
    assert_eq!(event.command, "/plzinviteme");
    assert_eq!(event.text, "join dev-talk");
    assert_eq!(event.response_url, "https://hooks.slack.com/commands/1234/5678");
}

#[test]
fn test_missing_fields_default_to_empty() {
    let event = parse_form_data("team_id=T1&novalue&text=").unwrap();
    assert_eq!(event.team_id, "T1");
    assert_eq!(event.text, "");
    assert_eq!(event.user_id, "");
}

#[test]
fn test_encoded_plus_survives() {
    assert_eq!(decode_url_component("c%2B%2B+talk").unwrap(), "c++ talk");
}

#[test]
fn test_invalid_utf8_is_rejected() {
    assert!(decode_url_component("%FF%FE").is_err());
    assert!(parse_form_data("text=%FF").is_err());
}

#[test]
fn test_context_replies_through_response_url() {
    let event =
        parse_form_data("team_id=T1&channel_id=C1&user_id=U1&text=list&response_url=https%3A%2F%2Fh")
            .unwrap();

    let ctx = event.into_context();

    assert_eq!(ctx.text, "list");
    assert_eq!(ctx.team_id, "T1");
    assert_eq!(ctx.reply_route, ReplyRoute::ResponseUrl("https://h".to_string()));
}
