//! Property tests for location descent and rendering.

use proptest::prelude::*;
use vkloc_core::{FieldId, FunctionId, Location, PathStep, RefPageId};

fn function() -> impl Strategy<Value = FunctionId> {
    proptest::sample::select(FunctionId::ALL.to_vec())
}

fn page() -> impl Strategy<Value = RefPageId> {
    proptest::sample::select(RefPageId::ALL.to_vec())
}

/// Fields other than `Empty`.
fn named_field() -> impl Strategy<Value = FieldId> {
    proptest::sample::select(FieldId::ALL[1..].to_vec())
}

fn step() -> impl Strategy<Value = (FieldId, Option<u32>)> {
    (named_field(), proptest::option::of(0u32..100_000))
}

/// Like [`step`], but sometimes descends into `Empty` (with or without an index).
fn any_step() -> impl Strategy<Value = (FieldId, Option<u32>)> {
    prop_oneof![
        4 => step(),
        1 => (Just(FieldId::Empty), proptest::option::of(0u32..100_000)),
    ]
}

fn walk(root: &Location, steps: &[(FieldId, Option<u32>)]) -> Location {
    steps
        .iter()
        .fold(root.clone(), |loc, &(field, index)| loc.descend(field, index))
}

fn render_step(field: FieldId, index: Option<u32>) -> String {
    match index {
        Some(i) => format!("{}[{i}]", field.as_str()),
        None => field.as_str().to_string(),
    }
}

/// Rendered path after descending through `steps` from a root, plus the
/// number of named steps in it.
fn expected_fields(steps: &[(FieldId, Option<u32>)]) -> (String, usize) {
    let mut ancestry: Vec<String> = Vec::new();
    let mut current = (FieldId::Empty, None);
    for &step in steps {
        if !current.0.is_empty() {
            ancestry.push(render_step(current.0, current.1));
        }
        current = step;
    }
    let mut out = ancestry.join(".");
    let mut named = ancestry.len();
    match current {
        (field, index) if !field.is_empty() => {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(&render_step(field, index));
            named += 1;
        }
        (_, Some(i)) => out.push_str(&format!("[{i}]")),
        (_, None) => {}
    }
    (out, named)
}

proptest! {
    #[test]
    fn render_joins_every_step_with_one_dot(
        function in function(),
        page in page(),
        steps in proptest::collection::vec(any_step(), 0..8),
    ) {
        let loc = walk(&Location::new(function, page), &steps);
        let fields = loc.fields();
        let (expected, named) = expected_fields(&steps);

        prop_assert_eq!(&fields, &expected);
        prop_assert_eq!(fields.matches('.').count(), named.saturating_sub(1));
        prop_assert!(!fields.ends_with('.'));
        prop_assert!(!fields.contains(".."));
        prop_assert_eq!(loc.message(), format!("{}(): {}", function.as_str(), fields));
    }

    #[test]
    fn unindexed_steps_never_render_brackets(
        steps in proptest::collection::vec(named_field(), 1..6),
    ) {
        let root = Location::new(FunctionId::vkCmdPipelineBarrier, RefPageId::Empty);
        let loc = steps.iter().fold(root, |loc, &field| loc.dot(field));
        prop_assert!(!loc.message().contains('['));
        prop_assert!(loc.path().all(|s| s.index.is_none()));
    }

    #[test]
    fn indices_render_as_decimal(field in named_field(), index in 0u32..u32::MAX) {
        let loc = Location::new(FunctionId::vkQueueSubmit, RefPageId::VkSubmitInfo)
            .dot_index(field, index);
        let expected = format!("{}[{}]", field.as_str(), index);
        prop_assert!(loc.message().ends_with(&expected));
    }

    #[test]
    fn identity_survives_branching_descents(
        function in function(),
        page in page(),
        trunk in proptest::collection::vec(step(), 0..5),
        left in proptest::collection::vec(step(), 0..5),
        right in proptest::collection::vec(step(), 0..5),
    ) {
        let base = walk(&Location::new(function, page), &trunk);
        for branch in [walk(&base, &left), walk(&base, &right)] {
            prop_assert_eq!(branch.function(), function);
            prop_assert_eq!(branch.reference_page(), page);
        }
    }

    #[test]
    fn sibling_descents_do_not_interfere(
        trunk in proptest::collection::vec(step(), 1..5),
        a in step(),
        b in step(),
    ) {
        let base = walk(
            &Location::new(FunctionId::vkCmdWaitEvents, RefPageId::VkMemoryBarrier),
            &trunk,
        );
        let snapshot = base.clone();

        let left = base.descend(a.0, a.1);
        let right = base.descend(b.0, b.1);

        prop_assert_eq!(&base, &snapshot);
        prop_assert_eq!(left, snapshot.descend(a.0, a.1));
        prop_assert_eq!(right, snapshot.descend(b.0, b.1));
    }

    #[test]
    fn ancestry_never_holds_empty(
        steps in proptest::collection::vec(any_step(), 0..8),
    ) {
        let root = Location::new(FunctionId::vkCreateRenderPass, RefPageId::VkSubpassDependency);
        let loc = walk(&root, &steps);
        prop_assert!(loc.ancestry().iter().all(|s: &PathStep| !s.field.is_empty()));
    }

    #[test]
    fn index_on_empty_field_is_never_dropped(
        trunk in proptest::collection::vec(step(), 0..4),
        index in 0u32..u32::MAX,
    ) {
        let loc = walk(
            &Location::new(FunctionId::vkCmdResetEvent, RefPageId::vkCmdResetEvent),
            &trunk,
        )
        .descend(FieldId::Empty, Some(index));
        let suffix = format!("[{index}]");
        prop_assert!(loc.message().ends_with(&suffix));
        prop_assert!(!loc.message().contains(".["));
    }
}
