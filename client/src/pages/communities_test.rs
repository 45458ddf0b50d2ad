use super::*;

fn community(id: &str, topic: &str) -> Community {
    Community {
        id: id.to_owned(),
        name: format!("Community {id}"),
        description: String::new(),
        topic: topic.to_owned(),
        member_count: 0,
        is_joined: false,
        created_at: None,
    }
}

#[test]
fn topic_options_start_with_all_and_skip_duplicates() {
    let list = [community("1", "Web3"), community("2", "AI"), community("3", "Web3"), community("4", "")];
    assert_eq!(topic_options(&list), ["all", "Web3", "AI"]);
}

#[test]
fn filter_by_topic_all_keeps_everything() {
    let list = [community("1", "Web3"), community("2", "AI")];
    assert_eq!(filter_by_topic(&list, ALL_TOPICS).len(), 2);
    let ai = filter_by_topic(&list, "AI");
    assert_eq!(ai.len(), 1);
    assert_eq!(ai[0].id, "2");
}

#[test]
fn quick_post_needs_a_community_first() {
    let draft = PostDraft { community_id: String::new(), title: "Hello there".into(), content: "Long enough body".into() };
    assert_eq!(check_quick_post(&draft), Err("Select a community"));
}

#[test]
fn quick_post_applies_title_and_content_rules() {
    let mut draft = PostDraft { community_id: "1".into(), title: "Hey".into(), content: "Long enough body".into() };
    assert!(check_quick_post(&draft).is_err());
    draft.title = "A proper title".into();
    assert_eq!(check_quick_post(&draft), Ok(()));
}
