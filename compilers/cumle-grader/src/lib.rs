pub mod authoring;
pub mod verify;

pub use authoring::{
    build_analysis, build_analysis_with, legacy_reconstruct_roles, legacy_role_for,
    reconstruct_roles, AuthoringError, Draft,
};
pub use verify::{verify, verify_board, Verdict, VerificationResult};

#[cfg(test)]
mod tests {
    use super::*;
    use cumle_board::Board;
    use cumle_protocol::{Analysis, Assignment, Role, RoleSelection, SentenceItem};
    use proptest::prelude::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn ali_okula_gitti() -> SentenceItem {
        let mut analysis = Analysis::new();
        analysis.insert(Role::Subject, words(&["Ali"]));
        analysis.insert(Role::Predicate, words(&["gitti"]));
        analysis.insert(Role::IndirectComplement, words(&["okula"]));
        SentenceItem::new("Ali okula gitti", analysis)
    }

    #[test]
    fn test_correct_attempt() {
        let item = ali_okula_gitti();
        let mut board = Board::new();
        board.place(Role::Subject, "Ali");
        board.place(Role::IndirectComplement, "okula");
        board.place(Role::Predicate, "gitti");

        let result = verify_board(&board, &item);
        assert_eq!(result.verdict, Verdict::Correct);
        assert!(result.ok);
    }

    #[test]
    fn test_swapped_words_mismatch() {
        let item = ali_okula_gitti();
        let mut board = Board::new();
        board.place(Role::Predicate, "Ali");
        board.place(Role::Subject, "gitti");
        board.place(Role::IndirectComplement, "okula");

        let result = verify_board(&board, &item);
        assert_eq!(result.verdict, Verdict::Mismatch);
        assert!(!result.ok);
    }

    #[test]
    fn test_omitted_word_is_missing() {
        let item = ali_okula_gitti();
        let mut board = Board::new();
        board.place(Role::Subject, "Ali");
        board.place(Role::Predicate, "gitti");

        assert_eq!(verify_board(&board, &item).verdict, Verdict::MissingWords);
    }

    #[test]
    fn test_case_and_order_are_ignored() {
        let mut analysis = Analysis::new();
        analysis.insert(Role::Subject, words(&["Küçük", "kız"]));
        analysis.insert(Role::Predicate, words(&["uyudu"]));
        let item = SentenceItem::new("Küçük kız uyudu", analysis);

        let mut attempt = Assignment::new();
        attempt.insert(Role::Subject, words(&["kız", "küçük"]));
        attempt.insert(Role::Predicate, words(&["UYUDU"]));
        assert_eq!(verify(&attempt, &item).verdict, Verdict::Correct);
    }

    #[test]
    fn test_count_check_is_lenient() {
        // A word placed twice makes up for a word never placed, as long as
        // the answer key does not name the missing word.
        let mut analysis = Analysis::new();
        analysis.insert(Role::Subject, words(&["Ali"]));
        analysis.insert(Role::Predicate, words(&["gitti"]));
        let item = SentenceItem::new("Ali okula gitti", analysis);

        let mut attempt = Assignment::new();
        attempt.insert(Role::Subject, words(&["Ali"]));
        attempt.insert(Role::Predicate, words(&["gitti", "gitti"]));
        assert_eq!(verify(&attempt, &item).verdict, Verdict::Correct);
    }

    #[test]
    fn test_roles_outside_reference_are_not_inspected() {
        let mut analysis = Analysis::new();
        analysis.insert(Role::Predicate, words(&["Geldi"]));
        let item = SentenceItem::new("Geldi", analysis);

        let mut attempt = Assignment::new();
        attempt.insert(Role::Subject, words(&["geldi"]));
        assert_eq!(verify(&attempt, &item).verdict, Verdict::Mismatch);

        let mut empty_reference = item.clone();
        empty_reference.analysis.clear();
        assert_eq!(verify(&attempt, &empty_reference).verdict, Verdict::Correct);
    }

    #[test]
    fn test_multi_word_entries_compare_word_by_word() {
        let mut analysis = Analysis::new();
        analysis.insert(Role::Subject, words(&["Bizim ev"]));
        analysis.insert(Role::Predicate, words(&["büyük"]));
        let item = SentenceItem::new("Bizim ev büyük", analysis);

        let mut attempt = Assignment::new();
        attempt.insert(Role::Subject, words(&["ev", "bizim"]));
        attempt.insert(Role::Predicate, words(&["büyük"]));
        assert_eq!(verify(&attempt, &item).verdict, Verdict::Correct);
    }

    #[test]
    fn test_build_analysis() {
        let draft = build_analysis(
            "Ali okula gitti",
            &[
                Role::Subject.into(),
                Role::IndirectComplement.into(),
                Role::Predicate.into(),
            ],
        )
        .unwrap();
        assert!(draft.complete);
        assert_eq!(draft.into_item(), ali_okula_gitti());
    }

    #[test]
    fn test_build_analysis_incomplete() {
        let draft = build_analysis("Ali okula gitti", &[Role::Subject.into()]).unwrap();
        assert!(!draft.complete);
        assert_eq!(draft.analysis.len(), 1);
        assert_eq!(draft.preview(), vec![(Role::Subject, "Ali".to_string())]);

        let draft = build_analysis(
            "Ali okula gitti",
            &[Role::Subject.into(), RoleSelection::Unselected, Role::Predicate.into()],
        )
        .unwrap();
        assert!(!draft.complete);
    }

    #[test]
    fn test_build_analysis_keeps_repeated_words() {
        let draft = build_analysis_with("çok çok güzel", |_, _| Role::Predicate.into());
        assert_eq!(draft.analysis[&Role::Predicate], words(&["çok", "çok", "güzel"]));
    }

    #[test]
    fn test_too_many_selections() {
        let err = build_analysis("Geldi", &[Role::Predicate.into(), Role::Subject.into()]);
        assert_eq!(
            err,
            Err(AuthoringError::TooManySelections { tokens: 1, selections: 2 })
        );
    }

    #[test]
    fn test_reconstruct_round_trip() {
        let item = ali_okula_gitti();
        assert_eq!(
            reconstruct_roles(&item),
            vec![
                RoleSelection::Role(Role::Subject),
                RoleSelection::Role(Role::IndirectComplement),
                RoleSelection::Role(Role::Predicate),
            ]
        );
    }

    #[test]
    fn test_reconstruct_repeated_and_prefix_words() {
        let mut analysis = Analysis::new();
        analysis.insert(Role::Subject, words(&["kedi"]));
        analysis.insert(Role::DefiniteObject, words(&["kediyi"]));
        analysis.insert(Role::Predicate, words(&["gördü"]));
        let item = SentenceItem::new("kedi kediyi gördü", analysis);

        let expected = vec![
            RoleSelection::Role(Role::Subject),
            RoleSelection::Role(Role::DefiniteObject),
            RoleSelection::Role(Role::Predicate),
        ];
        assert_eq!(reconstruct_roles(&item), expected);
        // The substring rule lets "kedi" match inside "kediyi".
        assert_eq!(
            legacy_reconstruct_roles(&item)[0],
            RoleSelection::Role(Role::DefiniteObject)
        );
    }

    #[test]
    fn test_reconstruct_unknown_token_falls_back() {
        let mut analysis = Analysis::new();
        analysis.insert(Role::Predicate, words(&["geldiler"]));
        let item = SentenceItem::new("Onlar geldi", analysis);
        assert_eq!(
            reconstruct_roles(&item),
            vec![RoleSelection::Unselected, RoleSelection::Role(Role::Predicate)]
        );
    }

    fn assign_distinct(text_words: &[String], picks: &[usize]) -> SentenceItem {
        let mut analysis = Analysis::new();
        for (word, pick) in text_words.iter().zip(picks) {
            analysis
                .entry(Role::ALL[*pick % Role::ALL.len()])
                .or_default()
                .push(word.clone());
        }
        SentenceItem::new(text_words.join(" "), analysis)
    }

    proptest! {
        #[test]
        fn test_analysis_as_attempt_is_correct(
            text_words in prop::collection::vec("[a-zçğıöşü]{1,8}", 1..8),
            picks in prop::collection::vec(0usize..8, 8),
        ) {
            let item = assign_distinct(&text_words, &picks);
            prop_assert_eq!(verify(&item.analysis, &item).verdict, Verdict::Correct);
        }

        #[test]
        fn test_count_difference_is_missing_words(
            text_words in prop::collection::vec("[a-z]{1,8}", 2..8),
            picks in prop::collection::vec(0usize..8, 8),
        ) {
            let item = assign_distinct(&text_words, &picks);
            let mut attempt = item.analysis.clone();
            let role = *attempt.keys().next().unwrap();
            attempt.get_mut(&role).unwrap().pop();
            prop_assert_eq!(verify(&attempt, &item).verdict, Verdict::MissingWords);
        }

        #[test]
        fn test_moved_word_is_mismatch(
            text_words in prop::collection::btree_set("[a-z]{1,8}", 2..8),
            picks in prop::collection::vec(0usize..8, 8),
        ) {
            let text_words: Vec<String> = text_words.into_iter().collect();
            let item = assign_distinct(&text_words, &picks);
            let mut attempt = item.analysis.clone();
            let from = *attempt.keys().next().unwrap();
            let to = Role::ALL.into_iter().find(|r| *r != from).unwrap();
            let word = attempt.get_mut(&from).unwrap().remove(0);
            attempt.entry(to).or_default().push(word);
            prop_assert_eq!(verify(&attempt, &item).verdict, Verdict::Mismatch);
        }

        #[test]
        fn test_reconstruct_inverts_build(
            text_words in prop::collection::vec("[a-z]{1,5}", 1..8),
            picks in prop::collection::vec(0usize..8, 8),
        ) {
            let selections: Vec<RoleSelection> = picks[..text_words.len()]
                .iter()
                .map(|p| RoleSelection::Role(Role::ALL[*p]))
                .collect();
            let draft = build_analysis(&text_words.join(" "), &selections).unwrap();
            let item = draft.into_item();
            let rebuilt = build_analysis(&item.text, &reconstruct_roles(&item)).unwrap();
            prop_assert!(rebuilt.complete);
            let sorted = |analysis: Analysis| -> Analysis {
                analysis
                    .into_iter()
                    .map(|(role, mut words)| {
                        words.sort();
                        (role, words)
                    })
                    .collect()
            };
            prop_assert_eq!(sorted(rebuilt.analysis), sorted(item.analysis));
        }
    }
}
