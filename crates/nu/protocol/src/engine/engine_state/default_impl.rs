impl Default for EngineState {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod engine_state_tests {
	use std::str::{Utf8Error, from_utf8};

	use super::*;
	use crate::engine::StateWorkingSet;

	#[test]
	fn add_file_gives_id() {
		let engine_state = EngineState::new();
		let mut engine_state = StateWorkingSet::new(&engine_state);
		let id = engine_state.add_file("test.nu".into(), &[]);

		assert_eq!(id, FileId::new(0));
	}

	#[test]
	fn add_file_gives_id_including_parent() {
		let mut engine_state = EngineState::new();
		let parent_id = engine_state.add_file("test.nu".into(), Arc::new([]));

		let mut working_set = StateWorkingSet::new(&engine_state);
		let working_set_id = working_set.add_file("child.nu".into(), &[]);

		assert_eq!(parent_id, FileId::new(0));
		assert_eq!(working_set_id, FileId::new(1));
	}

	#[test]
	fn merge_states() -> Result<(), ShellError> {
		let mut engine_state = EngineState::new();
		engine_state.add_file("test.nu".into(), Arc::new([]));

		let delta = {
			let mut working_set = StateWorkingSet::new(&engine_state);
			let _ = working_set.add_file("child.nu".into(), &[]);
			working_set.render()
		};

		engine_state.merge_delta(delta)?;

		assert_eq!(engine_state.num_files(), 2);
		assert_eq!(&*engine_state.files[0].name, "test.nu");
		assert_eq!(&*engine_state.files[1].name, "child.nu");

		Ok(())
	}

	#[test]
	fn list_variables() -> Result<(), Utf8Error> {
		let varname = "something";
		let varname_with_sigil = "$".to_owned() + varname;
		let engine_state = EngineState::new();
		let mut working_set = StateWorkingSet::new(&engine_state);
		working_set.add_variable(varname.as_bytes().into(), Span { start: 0, end: 1 }, Type::Int, false);
		let variables = working_set
			.list_variables()
			.into_iter()
			.map(from_utf8)
			.collect::<Result<Vec<&str>, Utf8Error>>()?;
		assert_eq!(variables, vec![varname_with_sigil]);
		Ok(())
	}

	#[test]
	fn get_plugin_config() {
		let mut engine_state = EngineState::new();

		assert!(engine_state.get_plugin_config("example").is_none(), "Unexpected plugin configuration");

		let mut plugins = HashMap::new();
		plugins.insert("example".into(), Value::string("value", Span::test_data()));

		let mut config = Config::clone(engine_state.get_config());
		config.plugins = plugins;

		engine_state.set_config(config);

		assert!(engine_state.get_plugin_config("example").is_some(), "Plugin configuration not found");
	}
}
