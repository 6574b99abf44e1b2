use anyhow::Result;

use crate::{CliTest, run};

const UNDEFINED_IN_TEMPLATE: &str = r#"
      <template>
        <div>
          <h1>{{ $tr('notDefined') }}</h1>
          <span>{{ $tr('helloWorld') }}</span>
        </div>
      </template>

      <script>
        export default {
          $trs: {
            helloWorld: 'Hello world',
          },
        }
      </script>
"#;

#[test]
fn test_undefined_key_in_template() -> Result<()> {
    let test = CliTest::with_file("src/Page.vue", UNDEFINED_IN_TEMPLATE)?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    let expected = "\
error: Message not defined in $trs: \"notDefined\"  undefined-string
  --> src/Page.vue:4:18
  |
4 |           <h1>{{ $tr('notDefined') }}</h1>
  |                  ^
";
    assert!(stdout.contains(expected), "unexpected output:\n{}", stdout);
    assert!(stdout.contains("1 problem (1 undefined-string, 0 parse-error)"));
    assert!(!stdout.contains("helloWorld"));

    Ok(())
}

#[test]
fn test_undefined_key_in_method() -> Result<()> {
    let test = CliTest::with_file(
        "src/Person.vue",
        r#"<template>
  <div>
    <h1>{{ $tr('testString') }}</h1>
  </div>
</template>

<script>
  export default {
    methods: {
      label() {
        return this.$tr('personLabel');
      },
    },
    $trs: {
      testString: 'Test string',
    },
  };
</script>
"#,
    )?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("error: Message not defined in $trs: \"personLabel\"  undefined-string"));
    assert!(stdout.contains("  --> src/Person.vue:11:16"));
    assert!(!stdout.contains("\"testString\""));

    Ok(())
}

#[test]
fn test_key_from_mixin_with_configured_call_name() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".trlintrc.json",
        r#"{ "callNames": ["$tr", "coachString"] }"#,
    )?;
    test.write_file(
        "src/views/common.js",
        "export default { $trs: { someCoachStringLabel: 'Coach label' } };\n",
    )?;
    test.write_file(
        "src/views/Report.vue",
        r#"<template>
  <div>
    <h1>{{ $tr('helloWorld') }}</h1>
    <h2>{{ coachString('someCoachStringLabel') }}</h2>
  </div>
</template>

<script>
  import commonCoach from './common';
  export default {
    mixins: [commonCoach],
    $trs: {
      helloWorld: 'Hello world',
    },
  };
</script>
"#,
    )?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0, "unexpected output:\n{}", stdout);
    assert!(stdout.contains("Checked 1 vue file - no issues found"));

    Ok(())
}

#[test]
fn test_alias_mixin() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".trlintrc.json",
        r#"{
  "callNames": ["$tr", "coreString"],
  "aliases": { "kolibri.coreVue.mixins": "core/mixins" }
}"#,
    )?;
    test.write_file(
        "core/mixins/commonCoreStrings.js",
        "const strings = { $trs: { cancelAction: 'Cancel' } };\nexport default strings;\n",
    )?;
    test.write_file(
        "plugins/Dialog.vue",
        r#"<template>
  <button>{{ coreString('cancelAction') }} {{ coreString('closeAction') }}</button>
</template>

<script>
  import commonCoreStrings from 'kolibri.coreVue.mixins/commonCoreStrings';
  export default { mixins: [commonCoreStrings] };
</script>
"#,
    )?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("\"closeAction\""));
    assert!(!stdout.contains("\"cancelAction\""));

    Ok(())
}

#[test]
fn test_dynamic_keys_are_ignored() -> Result<()> {
    let test = CliTest::with_file(
        "src/Kinds.vue",
        r#"<template>
  <ul>
    <li v-for="kind in kinds" :key="kind">{{ $tr(kind) }}</li>
  </ul>
</template>

<script>
  export default {
    computed: {
      labels() {
        return ['topic', 'channel', 'exercise'].map(f => $tr(f) + ':');
      },
    },
    $trs: {},
  };
</script>
"#,
    )?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0, "unexpected output:\n{}", stdout);
    assert!(stdout.contains("no issues found"));

    Ok(())
}

#[test]
fn test_parse_failure_is_reported_once() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/Broken.vue",
        "<template>\n  <p>{{ $tr('missing') }}</p>\n</template>\n<script>\nexport default {\n",
    )?;
    test.write_file("src/Good.vue", UNDEFINED_IN_TEMPLATE)?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert_eq!(stdout.matches("  parse-error\n").count(), 1);
    assert!(stdout.contains("--> src/Broken.vue"));
    assert!(!stdout.contains("\"missing\""));
    assert!(stdout.contains("\"notDefined\""));
    assert!(stdout.contains("2 problems (1 undefined-string, 1 parse-error)"));

    Ok(())
}

#[test]
fn test_unresolvable_mixin_is_not_fatal() -> Result<()> {
    let test = CliTest::with_file(
        "src/Page.vue",
        r#"<template><p>{{ $tr('title') }} {{ $tr('subtitle') }}</p></template>
<script>
  import missing from './does-not-exist';
  export default { mixins: [missing], $trs: { title: 'Title' } };
</script>
"#,
    )?;

    let (code, stdout, stderr) = run(test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("\"subtitle\""));
    assert!(stderr.contains("cannot resolve mixin"));

    Ok(())
}

#[test]
fn test_explicit_paths() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/a/Bad.vue", UNDEFINED_IN_TEMPLATE)?;
    test.write_file(
        "src/b/Good.vue",
        "<template><p>{{ $tr('ok') }}</p></template>\n<script>\nexport default { $trs: { ok: 'OK' } };\n</script>\n",
    )?;

    let mut cmd = test.check_command();
    cmd.arg("src/b");
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Checked 1 vue file - no issues found"));

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".trlintrc.json", r#"{ "ignores": ["**/generated/**"] }"#)?;
    test.write_file("src/generated/Bad.vue", UNDEFINED_IN_TEMPLATE)?;
    test.write_file("src/Page.spec.vue", UNDEFINED_IN_TEMPLATE)?;

    let (code, stdout, _) = run(test.check_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Checked 0 vue files - no issues found"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file("src/Page.vue", UNDEFINED_IN_TEMPLATE)?;
    test.write_file(".trlintrc.json", r#"{ "callNames": [] }"#)?;

    let (code, stdout, stderr) = run(test.check_command())?;

    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("callNames"));

    Ok(())
}

#[test]
fn test_missing_source_root_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.check_command();
    cmd.args(["--source-root", "nope"]);
    let (code, _, stderr) = run(cmd)?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Source root is not a directory"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(test.command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("check"));
    assert!(stdout.contains("init"));

    Ok(())
}
