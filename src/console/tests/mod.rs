//! Unit tests for the console registry.
//!
//! Covers registration, typed access, dispatch and history.
//! No filesystem access.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::{cell::RefCell, rc::Rc};

use crate::{
    console::{Command, Console, ConsoleError, InvokeOutcome, TypedVariable},
    settings::{ConsoleSettings, InvokePolicy},
    value::{Name, Value, ValueKind, Vec2, Vec3, Vec3f},
};

fn recorder() -> (Rc<RefCell<Vec<Value>>>, Rc<RefCell<usize>>) {
    (Rc::new(RefCell::new(Vec::new())), Rc::new(RefCell::new(0)))
}

mod registration {
    use super::*;

    #[test]
    fn registered_names_are_listed() {
        let mut console = Console::new();
        console.register_command("first", |_| Ok(())).unwrap();
        console.register_variable("second", 1_i32).unwrap();
        console.register_variable("third", "text".to_string()).unwrap();

        assert_eq!(console.len(), 3);
        assert_eq!(console.commands().count(), 3);
        assert_eq!(console.command_names(), vec!["first", "second", "third"]);
    }

    #[test]
    fn duplicate_registration_keeps_the_first_entry() {
        let mut console = Console::new();
        console.register_variable("volume", 5_i32).unwrap();

        let error = console.register_variable("VOLUME", 0.5_f64).unwrap_err();
        assert_eq!(error, ConsoleError::DuplicateName("volume".to_string()));

        assert_eq!(console.len(), 1);
        assert_eq!(console.get_variable_value::<i32>("volume"), Some(5));
        assert_eq!(console.get_variable_value::<f64>("volume"), None);
    }

    #[test]
    fn commands_and_variables_share_one_namespace() {
        let mut console = Console::new();
        console.register_command("quit", |_| Ok(())).unwrap();

        assert!(matches!(
            console.register_variable("quit", true),
            Err(ConsoleError::DuplicateName(_))
        ));
        assert!(console.get_variable("quit").is_none());
        assert!(!console.get_command("quit").unwrap().is_variable());
    }

    #[test]
    fn remove_all_forgets_everything() {
        let mut console = Console::new();
        console.register_variable("a", 1_i32).unwrap();
        console
            .add_variable(TypedVariable::new("b", true).in_config("Client", "Display"))
            .unwrap();
        console.parse_command("a 2");

        console.remove_all();

        assert!(console.is_empty());
        assert!(console.get_command("a").is_none());
        assert!(console.get_variable("b").is_none());
        assert!(console.config_variables("Client").is_none());
        assert!(console.history().is_empty());
    }

    #[test]
    fn register_value_infers_the_native_type() {
        let mut console = Console::new();
        console
            .register_value("c_gamma", Value::Float(2.2), Some(("Client", "Display")))
            .unwrap();
        console.register_value("p_name", Value::Name(Name::new("hero")), None).unwrap();

        assert_eq!(console.get_variable_value::<f64>("c_gamma"), Some(2.2));
        assert_eq!(console.get_variable_value::<Name>("p_name"), Some(Name::new("hero")));

        let bound = console.config_variables("Client").unwrap();
        assert_eq!(bound.len(), 1);
        assert_eq!(bound[0].section_name(), Some("Display"));
    }

    #[test]
    fn register_value_rejects_none() {
        let mut console = Console::new();
        assert_eq!(
            console.register_value("empty", Value::None, None),
            Err(ConsoleError::UnsupportedType {
                name: "empty".to_string(),
                kind: ValueKind::None,
            })
        );
        assert!(console.is_empty());
    }

    #[test]
    fn partial_config_binding_is_not_indexed() {
        let mut console = Console::new();
        console
            .add_variable(TypedVariable::new("only_config", 1_i32).with_config_name("Client"))
            .unwrap();
        console
            .add_variable(TypedVariable::new("empty_section", 1_i32).in_config("Client", ""))
            .unwrap();

        assert!(console.config_variables("Client").is_none());
        assert_eq!(
            console.get_variable("only_config").unwrap().config_name(),
            Some("Client")
        );
    }
}

mod typed_access {
    use super::*;

    #[test]
    fn update_and_read_back_natives() {
        let mut console = Console::new();
        console.register_variable("d", 0.0_f64).unwrap();
        console.register_variable("f", 0.0_f32).unwrap();
        console.register_variable("i", 0_i32).unwrap();
        console.register_variable("b", false).unwrap();

        console.update_variable("d", 12.5_f64).unwrap();
        console.update_variable("f", 0.25_f32).unwrap();
        console.update_variable("i", -42_i32).unwrap();
        console.update_variable("b", true).unwrap();

        assert_eq!(console.get_variable_value::<f64>("d"), Some(12.5));
        assert_eq!(console.get_variable_value::<f32>("f"), Some(0.25));
        assert_eq!(console.get_variable_value::<i32>("i"), Some(-42));
        assert_eq!(console.get_variable_value::<bool>("b"), Some(true));
    }

    #[test]
    fn update_converts_into_the_declared_type() {
        let mut console = Console::new();
        console.register_variable("i", 0_i32).unwrap();

        console.update_variable("i", 7_i64).unwrap();
        assert_eq!(console.get_variable_value::<i32>("i"), Some(7));

        console.update_variable("i", 3.9_f64).unwrap();
        assert_eq!(console.get_variable_value::<i32>("i"), Some(3));
        assert_eq!(console.get_variable("i").unwrap().value(), &Value::Int(3));
    }

    #[test]
    fn update_of_missing_variable_fails() {
        let mut console = Console::new();
        console.register_command("cmd", |_| Ok(())).unwrap();

        assert_eq!(
            console.update_variable("missing", 1_i32),
            Err(ConsoleError::NotFound("missing".to_string()))
        );
        assert_eq!(
            console.update_variable("cmd", 1_i32),
            Err(ConsoleError::NotFound("cmd".to_string()))
        );
    }

    #[test]
    fn typed_lookup_requires_the_declared_type() {
        let mut console = Console::new();
        console.register_variable("double", 2.5_f64).unwrap();
        console.register_variable("string", "a string".to_string()).unwrap();
        console
            .register_variable::<Vec3f>("vector", Vec3::new(1.0, 2.0, 3.0))
            .unwrap();

        assert_eq!(console.get_variable_value::<f64>("double"), Some(2.5));
        assert_eq!(
            console.get_variable_value::<String>("string"),
            Some("a string".to_string())
        );
        assert_eq!(
            console.get_variable_value::<Vec3f>("vector"),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );

        assert_eq!(console.get_variable_value::<f32>("double"), None);
        assert_eq!(console.get_variable_value::<Name>("string"), None);
        assert!(console.get_typed_variable::<i64>("vector").is_none());
    }

    #[test]
    fn variable_equals_is_tag_strict() {
        let mut console = Console::new();
        console.register_variable("count", 3_i32).unwrap();

        assert!(console.variable_equals("count", &3_i32));
        assert!(console.variable_equals("count", &3_i64));
        assert!(!console.variable_equals("count", &3.0_f64));
        assert!(!console.variable_equals("missing", &3_i32));
    }

    #[test]
    fn typed_variable_keeps_projection_in_sync() {
        let mut console = Console::new();
        console.register_variable::<u8>("level", 1).unwrap();

        let variable = console.get_typed_variable_mut::<u8>("level").unwrap();
        variable.set(9);
        assert_eq!(variable.get(), &9);

        let erased = console.get_variable("level").unwrap();
        assert_eq!(erased.value(), &Value::Int(9));
        assert_eq!(erased.value_kind(), ValueKind::Int);
        assert_eq!(erased.type_name(), "u8");
        assert_eq!(erased.to_string(), "level 9");
    }

    #[test]
    fn set_from_str_uses_the_native_parser() {
        let mut console = Console::new();
        console.register_variable("title", String::new()).unwrap();
        console.register_variable::<Vec2<i64>>("size", Vec2::default()).unwrap();

        console.get_variable_mut("title").unwrap().set_from_str("1,2");
        console.get_variable_mut("size").unwrap().set_from_str("640,480");

        assert_eq!(console.get_variable_value::<String>("title"), Some("1,2".to_string()));
        assert_eq!(console.get_variable_value::<Vec2<i64>>("size"), Some(Vec2::new(640, 480)));
    }
}

mod dispatch {
    use super::*;

    #[test]
    fn command_receives_parsed_arguments() {
        let mut console = Console::new();
        let (received, _) = recorder();
        let sink = Rc::clone(&received);

        console
            .register_command("testCommand", move |invocation| {
                sink.borrow_mut().extend_from_slice(invocation.args);
                assert_eq!(invocation.name, "testcommand");
                assert!(invocation.value.is_none());
                Ok(())
            })
            .unwrap();

        let outcome = console.parse_command("testCommand 1 2.0 8,3");

        assert_eq!(outcome, InvokeOutcome::Invoked { updated: false });
        assert_eq!(
            *received.borrow(),
            vec![Value::Int(1), Value::Float(2.0), Value::Vec2i(Vec2::new(8, 3))]
        );
    }

    #[test]
    fn variable_takes_first_argument() {
        let mut console = Console::new();
        console.register_variable("c_isFullscreen", true).unwrap();

        let outcome = console.parse_command("c_isFullscreen False");

        assert_eq!(outcome, InvokeOutcome::Invoked { updated: true });
        assert_eq!(console.get_variable_value::<bool>("c_isfullscreen"), Some(false));
    }

    #[test]
    fn variable_handler_sees_updated_value_and_all_args() {
        let mut console = Console::new();
        let (seen, _) = recorder();
        let sink = Rc::clone(&seen);

        console
            .add_variable(TypedVariable::new("c_resolution", Vec2::new(800_i64, 600)).on_invoke(
                move |invocation| {
                    let mut sink = sink.borrow_mut();
                    sink.extend(invocation.value.cloned());
                    sink.extend_from_slice(invocation.args);
                    Ok(())
                },
            ))
            .unwrap();

        console.parse_command("c_resolution 1920,1080 extra");

        assert_eq!(
            *seen.borrow(),
            vec![
                Value::Vec2i(Vec2::new(1920, 1080)),
                Value::Vec2i(Vec2::new(1920, 1080)),
                Value::String("extra".to_string()),
            ]
        );
    }

    #[test]
    fn variable_without_arguments_is_read() {
        let mut console = Console::new();
        let (_, calls) = recorder();
        let counter = Rc::clone(&calls);

        console
            .add_variable(TypedVariable::new("volume", 5_i32).on_invoke(move |_| {
                *counter.borrow_mut() += 1;
                Ok(())
            }))
            .unwrap();

        assert_eq!(console.parse_command("volume"), InvokeOutcome::Read(Value::Int(5)));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn unchanged_value_runs_handler_by_default() {
        let mut console = Console::new();
        let (_, calls) = recorder();
        let counter = Rc::clone(&calls);

        console
            .add_variable(TypedVariable::new("volume", 5_i32).on_invoke(move |_| {
                *counter.borrow_mut() += 1;
                Ok(())
            }))
            .unwrap();

        assert_eq!(
            console.invoke_command("volume", &[Value::Int(5)]),
            InvokeOutcome::Invoked { updated: false }
        );
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn unchanged_value_skips_handler_on_change_policy() {
        let mut console = Console::with_settings(ConsoleSettings {
            invoke_policy: InvokePolicy::OnChange,
            ..ConsoleSettings::default()
        });
        let (_, calls) = recorder();
        let counter = Rc::clone(&calls);

        console
            .add_variable(TypedVariable::new("volume", 5_i32).on_invoke(move |_| {
                *counter.borrow_mut() += 1;
                Ok(())
            }))
            .unwrap();

        assert_eq!(console.invoke_command("volume", &[Value::Int(5)]), InvokeOutcome::Skipped);
        assert_eq!(
            console.invoke_command("volume", &[Value::Int(6)]),
            InvokeOutcome::Invoked { updated: true }
        );
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn argument_of_another_tag_with_the_same_value_is_no_change() {
        let mut console = Console::new();
        console.register_variable("scale", 2.0_f64).unwrap();

        let outcome = console.parse_command("scale 2");

        assert_eq!(outcome, InvokeOutcome::Invoked { updated: false });
        assert_eq!(console.get_variable("scale").unwrap().value(), &Value::Float(2.0));

        assert_eq!(
            console.parse_command("scale 3"),
            InvokeOutcome::Invoked { updated: true }
        );
        assert_eq!(console.get_variable_value::<f64>("scale"), Some(3.0));
    }

    fn on_change_console() -> Console {
        Console::with_settings(ConsoleSettings {
            invoke_policy: InvokePolicy::OnChange,
            ..ConsoleSettings::default()
        })
    }

    #[test]
    fn repeated_f32_value_is_skipped_on_change_policy() {
        let mut console = on_change_console();
        console.register_variable("gamma", 2.2_f32).unwrap();

        assert_eq!(
            console.parse_command("gamma 1.2"),
            InvokeOutcome::Invoked { updated: true }
        );
        assert_eq!(console.parse_command("gamma 1.2"), InvokeOutcome::Skipped);
        assert_eq!(console.get_variable_value::<f32>("gamma"), Some(1.2));
    }

    #[test]
    fn repeated_name_value_is_skipped_on_change_policy() {
        let mut console = on_change_console();
        console.register_variable("map", Name::new("dust")).unwrap();

        assert_eq!(console.parse_command("map dust"), InvokeOutcome::Skipped);
        assert_eq!(
            console.parse_command("map aztec"),
            InvokeOutcome::Invoked { updated: true }
        );
        assert_eq!(console.get_variable_value::<Name>("map"), Some(Name::new("aztec")));
    }

    #[test]
    fn integer_literal_for_equal_float_is_skipped_on_change_policy() {
        let mut console = on_change_console();
        console.register_variable("scale", 2.0_f64).unwrap();

        assert_eq!(console.parse_command("scale 2"), InvokeOutcome::Skipped);
    }

    #[test]
    fn unsigned_variable_reads_full_range_from_the_command_line() {
        let mut console = Console::new();
        console.register_variable("big", 0_u64).unwrap();

        console.parse_command("big 18446744073709551615");
        assert_eq!(console.get_variable_value::<u64>("big"), Some(u64::MAX));

        console.parse_command("big -1");
        assert_eq!(console.get_variable_value::<u64>("big"), Some(0));
    }

    #[test]
    fn unknown_and_empty_lines() {
        let mut console = Console::new();

        assert_eq!(console.parse_command("nothing 1"), InvokeOutcome::NotFound);
        assert_eq!(console.parse_command("   "), InvokeOutcome::Empty);
        assert_eq!(console.history().len(), 1);
    }

    #[test]
    fn failing_handler_does_not_propagate() {
        let mut console = Console::new();
        console
            .add_command(Command::new("explode").on_invoke(|_| Err("boom".into())))
            .unwrap();

        assert_eq!(
            console.parse_command("explode"),
            InvokeOutcome::Invoked { updated: false }
        );
    }

    #[test]
    fn command_without_handler_is_a_no_op() {
        let mut console = Console::new();
        console.add_command(Command::new("noop")).unwrap();

        assert_eq!(
            console.invoke_command("noop", &[]),
            InvokeOutcome::Invoked { updated: false }
        );
    }

    #[test]
    fn names_are_case_insensitive_by_default() {
        let mut console = Console::new();
        console.register_variable("MaxFps", 60_i32).unwrap();

        console.parse_command("MAXFPS 144");

        assert_eq!(console.get_variable_value::<i32>("maxfps"), Some(144));
        assert_eq!(console.get_variable("maxFPS").unwrap().name(), "maxfps");
    }

    #[test]
    fn case_sensitive_console_keeps_names() {
        let mut console = Console::with_settings(ConsoleSettings {
            case_sensitive: true,
            ..ConsoleSettings::default()
        });
        console.register_variable("MaxFps", 60_i32).unwrap();
        console.register_variable("maxfps", 30_i32).unwrap();

        assert_eq!(console.parse_command("MAXFPS 144"), InvokeOutcome::NotFound);
        assert_eq!(console.get_variable_value::<i32>("MaxFps"), Some(60));
        assert_eq!(console.get_variable_value::<i32>("maxfps"), Some(30));
    }
}

mod history {
    use super::*;

    #[test]
    fn recalls_lines_older_then_newer() {
        let mut console = Console::new();
        console.add_recent_command("one");
        console.add_recent_command("two");
        console.add_recent_command("three");

        assert_eq!(console.next_command(), "three");
        assert_eq!(console.next_command(), "two");
        assert_eq!(console.next_command(), "one");
        assert_eq!(console.next_command(), "one");
        assert_eq!(console.previous_command(), "two");
        assert_eq!(console.previous_command(), "three");
        assert_eq!(console.previous_command(), "three");
    }

    #[test]
    fn consecutive_duplicates_are_stored_once() {
        let mut console = Console::new();
        console.add_recent_command("a");
        console.add_recent_command("a");
        console.add_recent_command("b");
        console.add_recent_command("a");

        assert_eq!(console.history().iter().collect::<Vec<_>>(), vec!["a", "b", "a"]);
    }

    #[test]
    fn push_resets_the_cursor() {
        let mut console = Console::new();
        console.add_recent_command("one");
        console.add_recent_command("two");
        console.next_command();
        console.next_command();

        console.add_recent_command("two");

        assert_eq!(console.history().cursor(), 2);
        assert_eq!(console.next_command(), "two");
    }

    #[test]
    fn empty_history_recalls_nothing() {
        let mut console = Console::new();
        assert_eq!(console.next_command(), "");
        assert_eq!(console.previous_command(), "");
    }

    #[test]
    fn history_is_bounded() {
        let mut console = Console::with_settings(ConsoleSettings {
            history_limit: 2,
            ..ConsoleSettings::default()
        });
        console.parse_command("a");
        console.parse_command("b");
        console.parse_command("c");

        assert_eq!(console.history().iter().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn parsed_lines_are_recorded_trimmed() {
        let mut console = Console::new();
        console.parse_command("  status  ");
        assert_eq!(console.history().iter().collect::<Vec<_>>(), vec!["status"]);
    }
}

mod command_line {
    use super::*;

    #[test]
    fn process_arguments_set_variables() {
        let mut console = Console::new();
        console.register_variable("c_isFullscreen", false).unwrap();
        console.register_variable::<Vec2<i64>>("c_resolution", Vec2::new(800, 600)).unwrap();
        console.register_variable("s", 1.0_f64).unwrap();

        let applied = console.map_command_line_args([
            "devconsole",
            "--c_isFullscreen",
            "--c_resolution",
            "1920,1080",
            "-s",
            "-0.5",
            "--unknown",
            "7",
        ]);

        assert_eq!(applied, 3);
        assert_eq!(console.get_variable_value::<bool>("c_isfullscreen"), Some(true));
        assert_eq!(
            console.get_variable_value::<Vec2<i64>>("c_resolution"),
            Some(Vec2::new(1920, 1080))
        );
        assert_eq!(console.get_variable_value::<f64>("s"), Some(-0.5));
    }
}
