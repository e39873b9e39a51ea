use pretty_assertions::assert_eq;
use rstest::rstest;
use usertagging_engine::{
    DEFAULT_MEMBER_HOSTS, MentionToken, Span, collapse_styled_spans_to_canonical_text,
    decode_first, extract_member_id_from_route, replace_all_with_placeholder,
    resource_id_from_route, scan_all, tagged_members,
};

const GREETING: &str = "Hey <<Alice|route://user/1>> and <<Bob|route://user/2>>, welcome!";

#[rstest]
#[case("Alice", "route://user/1")]
#[case("Zoë O'Brien", "route://member/7")]
#[case("李雷", "route://chatroom/3/member/88")]
#[case("a", "route://u/x")]
fn decode_first_inverts_encode(#[case] name: &str, #[case] route: &str) {
    let token = MentionToken::new(name, route).unwrap();
    let encoded = token.encode();
    let m = decode_first(Some(&encoded)).unwrap();
    assert_eq!(m.token, token);
    assert_eq!(m.span, Span::new(0, encoded.len()));
}

#[test]
fn n_tokens_give_n_ordered_disjoint_matches() {
    let text = (1..=12)
        .map(|i| format!("item {i}: <<User {i}|route://user/{i}>>"))
        .collect::<Vec<_>>()
        .join("; ");

    let matches = scan_all(Some(&text));
    assert_eq!(matches.len(), 12);
    for pair in matches.windows(2) {
        assert!(pair[0].span.end <= pair[1].span.start);
    }
    for (i, m) in matches.iter().enumerate() {
        assert_eq!(m.token.resource_id(), Some((i + 1).to_string().as_str()));
    }
}

#[test]
fn empty_or_absent_text_has_no_matches() {
    assert!(scan_all(Some("")).is_empty());
    assert!(scan_all(None).is_empty());
}

#[test]
fn resource_id_example() {
    assert_eq!(resource_id_from_route("route://user/482"), Ok("482"));
}

#[test]
fn member_id_examples() {
    let hosts = ["member_profile", "member", "user_profile"];
    assert_eq!(hosts, DEFAULT_MEMBER_HOSTS);
    assert_eq!(
        extract_member_id_from_route("route://member/7", &hosts),
        Some("7")
    );
    assert_eq!(extract_member_id_from_route("route://post/7", &hosts), None);
}

#[test]
fn greeting_batch_decode_and_re_encode() {
    let members: Vec<(String, String)> = tagged_members(Some(GREETING))
        .into_iter()
        .map(|m| (m.member_id, m.mention))
        .collect();
    assert_eq!(
        members,
        vec![
            ("1".to_string(), "@Alice".to_string()),
            ("2".to_string(), "@Bob".to_string()),
        ]
    );

    // re-encode each decoded token and splice it back over its own span
    let mut rebuilt = String::new();
    let mut last = 0;
    for m in scan_all(Some(GREETING)) {
        rebuilt.push_str(&GREETING[last..m.span.start]);
        rebuilt.push_str(&m.token.encode());
        last = m.span.end;
    }
    rebuilt.push_str(&GREETING[last..]);
    assert_eq!(rebuilt, GREETING);
}

#[test]
fn malformed_near_token_is_left_verbatim() {
    let text = "ping <<Alice>> later";
    assert!(scan_all(Some(text)).is_empty());

    let buf = replace_all_with_placeholder(Some(text), |_| ());
    assert_eq!(buf.text(), text);
    assert_eq!(buf.collapse().unwrap(), text);
}

#[test]
fn decode_then_collapse_is_idempotent() {
    let once = replace_all_with_placeholder(Some(GREETING), |t| t.mention_text())
        .collapse()
        .unwrap();
    let twice = replace_all_with_placeholder(Some(&once), |t| t.mention_text())
        .collapse()
        .unwrap();
    assert_eq!(once, GREETING);
    assert_eq!(twice, once);
}

#[test]
fn collapse_accepts_spans_from_any_source() {
    let buf = replace_all_with_placeholder(Some(GREETING), |_| ());
    let (text, spans) = buf.into_parts();
    let mut reversed = spans;
    reversed.reverse();
    assert_eq!(
        collapse_styled_spans_to_canonical_text(&text, &reversed).unwrap(),
        GREETING
    );
}
