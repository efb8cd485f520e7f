use crate::{Error, LoopRules, PreviousImportSettings, TargetObjectType};
use std::path::Path;

#[test]
fn non_looping_patterns_match_whole_words_only() {
    let rules = LoopRules::new(&["death", "hit"]).expect("rules");

    assert!(!rules.is_looping("death"));
    assert!(!rules.is_looping("hit"));
    assert!(!rules.is_looping("big death"));
    assert!(rules.is_looping("deathly"));
    assert!(rules.is_looping("hit_combo"));
    assert!(rules.is_looping("idle"));
}

#[test]
fn matching_is_case_sensitive() {
    let rules = LoopRules::new(&["death"]).expect("rules");
    assert!(rules.is_looping("Death"));
}

#[test]
fn empty_pattern_list_loops_everything() {
    let rules = LoopRules::new::<&str>(&[]).expect("rules");
    assert!(rules.is_looping("death"));

    let blanks = LoopRules::new(&["", ""]).expect("rules");
    assert!(blanks.is_looping("anything"));
}

#[test]
fn fragments_are_regular_expressions() {
    let rules = LoopRules::new(&["die|dying", "attack_\\d+"]).expect("rules");
    assert!(!rules.is_looping("dying"));
    assert!(!rules.is_looping("attack_2"));
    assert!(rules.is_looping("attack_x"));
}

#[test]
fn invalid_fragment_is_reported() {
    let err = LoopRules::new(&["(unclosed"]).expect_err("invalid pattern");
    assert!(matches!(err, Error::InvalidLoopPattern { .. }));
}

#[test]
fn recorded_clip_targets_are_looked_up_by_path() {
    let mut previous = PreviousImportSettings::default();
    assert!(!previous.has_texture_settings());

    previous.record_clip_target("Animations/hero@run.anim", TargetObjectType::Image);
    assert_eq!(
        previous.clip_target(Path::new("Animations/hero@run.anim")),
        Some(TargetObjectType::Image)
    );
    assert_eq!(previous.clip_target(Path::new("Animations/hero@idle.anim")), None);
    assert_eq!(previous.sprite_pivot("hero 00"), None);
}
