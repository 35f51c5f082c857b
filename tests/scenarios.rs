use task_knapsack::{
    DpSolver, Granularity, GreedySolver, ScheduleError, Scheduler, SchedulerBuilder, TableMode,
    Task,
};

fn tasks(defs: &[(&str, f64, u32)]) -> Vec<Task> {
    defs.iter()
        .map(|&(name, hours, value)| Task::new(name, hours, value).unwrap())
        .collect()
}

fn names<'a>(chosen: &[&'a Task]) -> Vec<&'a str> {
    chosen.iter().map(|t| t.name()).collect()
}

#[test]
fn classic_four_tasks_both_pick_a_and_b() {
    let tasks = tasks(&[("A", 2.0, 3), ("B", 3.0, 4), ("C", 4.0, 5), ("D", 5.0, 6)]);
    for mode in [TableMode::Full, TableMode::Rolling] {
        let scheduler = SchedulerBuilder::new().table_mode(mode).build();
        let comparison = scheduler.compare(Some(&tasks), 5.0).unwrap();
        assert_eq!(names(&comparison.dp().chosen), ["A", "B"]);
        assert_eq!(comparison.dp().total_hours(), 5.0);
        assert_eq!(comparison.dp().total_value, 7);
        assert_eq!(names(&comparison.greedy().chosen), ["A", "B"]);
        assert_eq!(comparison.greedy().total_value, 7);
    }
}

#[test]
fn greedy_falls_short_when_density_misleads() {
    let tasks = tasks(&[("X", 1.0, 10), ("Y", 2.0, 12), ("Z", 2.0, 12)]);
    let comparison = Scheduler::new().compare(Some(&tasks), 2.0).unwrap();

    // Y and Z tie at the last row; the tie keeps Z out.
    assert_eq!(names(&comparison.dp().chosen), ["Y"]);
    assert_eq!(comparison.dp().total_value, 12);
    assert_eq!(names(&comparison.greedy().chosen), ["X"]);
    assert_eq!(comparison.greedy().total_value, 10);
    assert_eq!(comparison.value_gap(), 2);
    assert!(comparison
        .narrative()
        .contains(" DP found 2 more value than Greedy\n"));
}

#[test]
fn zero_capacity_selects_nothing() {
    let tasks = tasks(&[("A", 0.5, 5), ("B", 1.0, 9)]);
    let comparison = Scheduler::new().compare(Some(&tasks), 0.0).unwrap();
    assert!(comparison.dp().chosen.is_empty());
    assert!(comparison.greedy().chosen.is_empty());
    assert_eq!(comparison.dp().total_value, 0);
    assert_eq!(comparison.greedy().total_value, 0);
    assert_eq!(comparison.dp().table().map(|t| t.cols()), Some(1));
}

#[test]
fn empty_task_list_is_valid() {
    let comparison = Scheduler::new().compare(Some(&[]), 8.0).unwrap();
    assert!(comparison.dp().chosen.is_empty());
    assert!(comparison.greedy().ranking.is_empty());
    assert_eq!(comparison.dp().table().map(|t| t.rows()), Some(1));
}

#[test]
fn missing_task_list_is_invalid_input() {
    let err = Scheduler::new().compare(None, 8.0).unwrap_err();
    assert_eq!(err, ScheduleError::InvalidInput);
}

#[test]
fn negative_capacity_rejected_by_both_solvers() {
    let tasks = tasks(&[("A", 1.0, 1)]);
    assert!(matches!(
        DpSolver::new().solve(&tasks, -1.0),
        Err(ScheduleError::InvalidCapacity { .. })
    ));
    assert!(matches!(
        GreedySolver::new().solve(&tasks, -1.0),
        Err(ScheduleError::InvalidCapacity { .. })
    ));
    assert!(matches!(
        Scheduler::new().compare(Some(&tasks), -1.0),
        Err(ScheduleError::InvalidCapacity { .. })
    ));
}

#[test]
fn non_finite_capacity_rejected() {
    let tasks = tasks(&[("A", 1.0, 1)]);
    for capacity in [f64::NAN, f64::INFINITY] {
        assert!(matches!(
            Scheduler::new().compare(Some(&tasks), capacity),
            Err(ScheduleError::InvalidCapacity { .. })
        ));
    }
}

#[test]
fn off_grid_capacity_depends_on_granularity() {
    let tasks = tasks(&[("A", 1.0, 4), ("B", 0.5, 1)]);
    assert!(matches!(
        Scheduler::new().compare(Some(&tasks), 1.2),
        Err(ScheduleError::InvalidCapacity { .. })
    ));

    let comparison = SchedulerBuilder::new()
        .granularity(Granularity::Truncate)
        .build()
        .compare(Some(&tasks), 1.2)
        .unwrap();
    assert_eq!(comparison.capacity_hours(), 1.0);
    assert_eq!(names(&comparison.dp().chosen), ["A"]);
}

#[test]
fn table_limit_guards_allocation() {
    let tasks = tasks(&[("A", 1.0, 1), ("B", 1.0, 2)]);
    let scheduler = SchedulerBuilder::new().max_table_cells(10).build();
    let err = scheduler.compare(Some(&tasks), 4.0).unwrap_err();
    assert_eq!(
        err,
        ScheduleError::CapacityTooLarge {
            units: 8,
            cells: 27,
            limit: 10
        }
    );

    let err = SchedulerBuilder::new()
        .max_capacity_units(4)
        .build()
        .compare(Some(&tasks), 4.0)
        .unwrap_err();
    assert!(matches!(err, ScheduleError::CapacityTooLarge { units: 8, .. }));
}

#[test]
fn half_hour_tasks_fill_exactly() {
    let tasks = tasks(&[("A", 1.5, 6), ("B", 2.5, 9), ("C", 1.0, 3)]);
    let comparison = Scheduler::new().compare(Some(&tasks), 4.0).unwrap();
    assert_eq!(names(&comparison.dp().chosen), ["A", "B"]);
    assert_eq!(comparison.dp().total_hours(), 4.0);
    assert_eq!(comparison.dp().total_value, 15);
}
