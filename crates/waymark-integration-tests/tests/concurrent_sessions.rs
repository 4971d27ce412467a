//! One loaded wizard and one theme registry shared by sessions on many
//! threads. Each session owns its variables; nothing leaks between them.

use std::thread;

use waymark_core::test_utils::{RecordingTaskRunner, ScriptedRenderer, project_wizard};
use waymark_core::{ThemeRegistry, Value, WizardEngine};

const THEMES: [&str; 3] = ["default", "colorful", "minimal"];

#[test]
fn parallel_sessions_share_definition_and_themes() {
    let wizard = project_wizard();
    let themes = ThemeRegistry::with_builtins();

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let wizard = &wizard;
                let themes = &themes;
                scope.spawn(move || {
                    let mut engine = WizardEngine::new(themes);
                    engine.set_theme(THEMES[i % THEMES.len()]).unwrap();

                    let use_db = i % 2 == 0;
                    let mut answers = vec![Value::from(format!("app-{i}")), Value::Bool(use_db)];
                    if use_db {
                        answers.push(Value::from("sqlite"));
                    }
                    answers.push(Value::from(vec!["docker"]));

                    let mut renderer = ScriptedRenderer::new(answers);
                    let mut tasks = RecordingTaskRunner::default();
                    let result = engine.run(wizard, &mut renderer, &mut tasks).unwrap();
                    (i, result, renderer, tasks)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.len(), 8);
    for (i, result, renderer, tasks) in results {
        assert!(result.completed, "session {i}");
        assert_eq!(
            result.variables.get("project_name"),
            Some(&Value::from(format!("app-{i}")))
        );
        assert_eq!(
            renderer.titles.last(),
            Some(&format!("app-{i} is ready"))
        );
        assert!(renderer.themes_seen.iter().all(|t| t == THEMES[i % THEMES.len()]));

        if i % 2 == 0 {
            assert_eq!(tasks.ran, vec!["scaffold", "docker", "migrate"]);
        } else {
            assert_eq!(tasks.ran, vec!["scaffold", "docker"]);
            assert_eq!(result.variables.get("database"), None);
        }
    }
}

#[test]
fn session_results_are_independent_of_each_other() {
    let wizard = project_wizard();
    let themes = ThemeRegistry::with_builtins();
    let engine = WizardEngine::new(&themes);

    let mut first = engine.start(&wizard);
    let mut second = engine.start(&wizard);
    first.proceed().unwrap();
    second.proceed().unwrap();
    first.submit(Value::from("one")).unwrap();
    second.submit(Value::from("two")).unwrap();

    assert_eq!(first.context().get("project_name"), Some(&Value::from("one")));
    assert_eq!(second.context().get("project_name"), Some(&Value::from("two")));
    assert_eq!(wizard.variables().get("project_name"), None);
}
