use invitechan::core::intent::Intent;

#[test]
fn test_list_matches_exact_and_prefix() {
    assert_eq!(Intent::parse("list"), Intent::ListOpenChannels);
    // Anything after "list" is ignored.
    assert_eq!(Intent::parse("list please"), Intent::ListOpenChannels);
    assert_eq!(Intent::parse("listing"), Intent::ListOpenChannels);
}

#[test]
fn test_join_and_leave_take_the_rest_verbatim() {
    assert_eq!(
        Intent::parse("join general"),
        Intent::JoinChannel {
            name: "general".to_string()
        }
    );
    assert_eq!(
        Intent::parse("leave general"),
        Intent::LeaveChannel {
            name: "general".to_string()
        }
    );
    assert_eq!(
        Intent::parse("join  dev talk "),
        Intent::JoinChannel {
            name: " dev talk ".to_string()
        }
    );
    assert_eq!(
        Intent::parse("join #general"),
        Intent::JoinChannel {
            name: "#general".to_string()
        }
    );
}

#[test]
fn test_join_requires_a_space() {
    assert_eq!(Intent::parse("joingeneral"), Intent::ShowHelp);
    assert_eq!(Intent::parse("join"), Intent::ShowHelp);
    assert_eq!(Intent::parse("leave"), Intent::ShowHelp);
}

#[test]
fn test_join_with_empty_name_is_still_a_join() {
    assert_eq!(
        Intent::parse("join "),
        Intent::JoinChannel {
            name: String::new()
        }
    );
}

#[test]
fn test_matching_is_case_sensitive() {
    assert_eq!(Intent::parse("List"), Intent::ShowHelp);
    assert_eq!(Intent::parse("JOIN general"), Intent::ShowHelp);
    assert_eq!(Intent::parse(" list"), Intent::ShowHelp);
}

#[test]
fn test_everything_else_is_help() {
    for text in ["", "help", "hello there", "?", "please join general"] {
        assert_eq!(Intent::parse(text), Intent::ShowHelp, "input {text:?}");
    }
}

#[test]
fn test_intent_kind_labels() {
    assert_eq!(Intent::parse("list").kind(), "list");
    assert_eq!(Intent::parse("join a").kind(), "join");
    assert_eq!(Intent::parse("leave a").kind(), "leave");
    assert_eq!(Intent::parse("").kind(), "help");
}
