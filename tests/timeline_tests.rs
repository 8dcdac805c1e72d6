use timeline_tool::task::SELF_PACED_LABEL;
use timeline_tool::{
    Module, Phase, ProductBundle, ProductRegistry, TierTable, Timeline, generate_timeline,
};

fn timeline_for(employee_count: i64, product_key: &str) -> Timeline {
    let tier = TierTable::default().resolve(employee_count).unwrap();
    let registry = ProductRegistry::default();
    generate_timeline(&tier, registry.get(product_key).unwrap())
}

fn placement(timeline: &Timeline, id: &str) -> (u32, u32) {
    let task = timeline
        .find(id)
        .unwrap_or_else(|| panic!("missing task {id}"));
    (task.start, task.duration)
}

#[test]
fn clear_recruit_at_750_employees() {
    let timeline = timeline_for(750, "ClearRecruit");
    let expected = [
        ("kickoff", 0, 1),
        ("requirements", 0, 2),
        ("recruiting-implementation", 2, 7),
        ("recruiting-setup", 2, 2),
        ("recruiting-learning", 2, 5),
        ("recruiting-testing", 6, 3),
        ("historical-data-import", 5, 4),
        ("onboarding-implementation", 8, 7),
        ("onboarding-setup", 8, 2),
        ("onboarding-learning", 8, 5),
        ("onboarding-testing", 12, 3),
        ("onboarding-integration", 11, 4),
        ("rollout-training", 15, 2),
        ("golive", 17, 1),
    ];
    let ids: Vec<&str> = timeline.tasks().iter().map(|t| t.id.as_str()).collect();
    let expected_ids: Vec<&str> = expected.iter().map(|(id, _, _)| *id).collect();
    assert_eq!(ids, expected_ids);
    for (id, start, duration) in expected {
        assert_eq!(placement(&timeline, id), (start, duration), "task {id}");
    }
    assert_eq!(timeline.total_weeks(), 18);
}

#[test]
fn regeneration_is_identical() {
    for (count, key) in [(50, "TotalTalent"), (750, "ClearTalent"), (5000, "ClearGrow")] {
        assert_eq!(timeline_for(count, key), timeline_for(count, key));
    }
}

#[test]
fn self_paced_band_builds_a_checklist() {
    let timeline = timeline_for(50, "ClearTalent");
    let tasks = timeline.tasks();
    assert_eq!(tasks.len(), 1 + 3 * 4 + 1);

    let setup = &tasks[0];
    assert_eq!(setup.id, "optional-setup");
    assert_eq!(setup.name, "Optional ClearCompany Setup Assistance");
    assert_eq!(setup.phase, Phase::InitiationAndPlanning);
    assert_eq!(setup.duration, 2);
    assert!(!setup.is_self_paced);

    for task in &tasks[1..] {
        assert!(task.is_self_paced, "{} should be self-paced", task.id);
        assert_eq!(task.duration, 1);
        assert_eq!(task.self_paced_label.as_deref(), Some(SELF_PACED_LABEL));
    }

    let golive = tasks.last().unwrap();
    assert_eq!(golive.id, "golive");
    assert_eq!(golive.phase, Phase::Launch);

    assert!(timeline.find("historical-data-import").is_none());
    assert!(timeline.find("onboarding-integration").is_none());
    assert!(timeline.find("recruiting-integration").is_none());
}

#[test]
fn self_paced_modules_follow_bundle_order() {
    let tier = TierTable::default().resolve(10).unwrap();
    let bundle = ProductBundle::new(
        "Reversed",
        vec![Module::Lms, Module::Recruiting],
        false,
    );
    let timeline = generate_timeline(&tier, &bundle);
    let ids: Vec<&str> = timeline.tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "optional-setup",
            "lms-implementation",
            "lms-setup",
            "lms-learning",
            "lms-testing",
            "recruiting-implementation",
            "recruiting-setup",
            "recruiting-learning",
            "recruiting-testing",
            "golive",
        ]
    );
}

#[test]
fn testing_ends_at_module_end_for_every_band() {
    let registry = ProductRegistry::default();
    for count in [200, 600, 1000, 1500, 2001] {
        let tier = TierTable::default().resolve(count).unwrap();
        for product in registry.products() {
            let timeline = generate_timeline(&tier, product);
            for module in &product.modules {
                let slug = timeline_tool::slugify(&module.to_string());
                let implementation = timeline.find(&format!("{slug}-implementation")).unwrap();
                let testing = timeline.find(&format!("{slug}-testing")).unwrap();
                assert_eq!(
                    testing.end(),
                    implementation.start + tier.weeks_per_module,
                    "{} / {module} at {count}",
                    product.key
                );
            }
        }
    }
}

#[test]
fn scheduled_durations_are_at_least_one_week() {
    let registry = ProductRegistry::default();
    for count in [200, 600, 1000, 1500, 2001] {
        let tier = TierTable::default().resolve(count).unwrap();
        for product in registry.products() {
            for task in generate_timeline(&tier, product).tasks() {
                assert!(!task.is_self_paced);
                assert!(task.duration >= 1, "{} at {count}", task.id);
            }
        }
    }
}

#[test]
fn consecutive_modules_overlap_by_one_week() {
    let timeline = timeline_for(1200, "TotalTalent");
    let starts: Vec<u32> = [
        "recruiting-implementation",
        "onboarding-implementation",
        "lms-implementation",
        "performance-goals-engagement-implementation",
        "compensation-management-implementation",
    ]
    .iter()
    .map(|id| placement(&timeline, id).0)
    .collect();
    assert_eq!(starts, [2, 10, 18, 26, 34]);
    assert_eq!(placement(&timeline, "rollout-training"), (43, 3));
    assert_eq!(placement(&timeline, "golive"), (46, 1));
}

#[test]
fn integration_tasks_follow_module_and_flag() {
    let ats = timeline_for(750, "ClearRecruit (ATS Only)");
    assert_eq!(placement(&ats, "recruiting-integration"), (5, 4));
    assert!(ats.find("onboarding-integration").is_none());

    let recruit = timeline_for(750, "ClearRecruit");
    assert!(recruit.find("recruiting-integration").is_none());
    assert!(recruit.find("onboarding-integration").is_some());

    let learn = timeline_for(750, "ClearLearn");
    assert!(learn.find("historical-data-import").is_none());
    assert!(learn.find("onboarding-integration").is_none());
}

#[test]
fn phases_group_in_first_appearance_order() {
    let timeline = timeline_for(750, "ClearRecruit");
    let groups = timeline.tasks_by_phase();
    let phases: Vec<Phase> = groups.iter().map(|(phase, _)| *phase).collect();
    assert_eq!(
        phases,
        [Phase::InitiationAndPlanning, Phase::Execution, Phase::Launch]
    );
    assert_eq!(groups[0].1.len(), 2);
    assert_eq!(groups[1].1.len(), 10);
    assert_eq!(groups[2].1.len(), 2);
}

#[test]
fn dataframe_exposes_end_week() {
    let timeline = timeline_for(750, "ClearRecruit");
    let df = timeline.to_dataframe().unwrap();
    let ends: Vec<Option<i64>> = df.column("end").unwrap().i64().unwrap().into_iter().collect();
    let expected: Vec<Option<i64>> = timeline
        .tasks()
        .iter()
        .map(|t| Some(i64::from(t.end())))
        .collect();
    assert_eq!(ends, expected);
}
