use theme_testing::TestWorld;

#[test]
fn test_no_sessions_yet() {
    let world = TestWorld::new();

    let result = world.run(&["sessions"]).unwrap();

    assert!(result.success());
    assert!(result.stdout().contains("No cached sessions"));
}

#[test]
fn test_lists_named_sessions() {
    let world = TestWorld::new().with_news_dataset();
    world
        .run_with_stdin(&["run", "--config", "theme.toml"], " \n \n")
        .unwrap();
    world
        .run_with_stdin(
            &["run", "--config", "theme.toml", "--session", "second"],
            "0\n",
        )
        .unwrap();

    let result = world.run(&["sessions", "--config", "theme.toml"]).unwrap();

    assert!(result.success(), "sessions failed: {}", result.stderr());
    let lines: Vec<&str> = result.stdout().lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("default"));
    assert!(lines[1].contains(" 2 "));
    assert!(lines[2].starts_with("second"));
}
