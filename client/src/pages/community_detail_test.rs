use super::*;

#[test]
fn membership_label_reflects_flag_and_progress() {
    assert_eq!(membership_label(false, false), "Join Community");
    assert_eq!(membership_label(false, true), "Joining...");
    assert_eq!(membership_label(true, false), "Leave Community");
    assert_eq!(membership_label(true, true), "Leaving...");
}
