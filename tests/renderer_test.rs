use recode::error::Error;
use recode::helpers::HELPERS;
use recode::renderer::{Mode, Renderer, TemplateSpec, IDENTITY_TEMPLATE};
use std::io::Cursor;

fn render(spec: &TemplateSpec, input: &str) -> String {
    Renderer::compile(spec, HELPERS).unwrap().render(Cursor::new(input)).unwrap()
}

fn row(template: &str) -> TemplateSpec {
    TemplateSpec::from_options(template, "", ",")
}

#[test]
fn test_mode_selection() {
    let spec = TemplateSpec::from_options("r", "c", ";");
    assert_eq!(spec.mode, Mode::Row);
    assert_eq!(spec.source, "r");

    let spec = TemplateSpec::from_options("", "c", ";");
    assert_eq!(spec.mode, Mode::Column { separator: ";".to_string() });

    let spec = TemplateSpec::from_options("", "", ",");
    assert_eq!(spec.mode, Mode::Row);
    assert_eq!(spec.source, IDENTITY_TEMPLATE);
}

#[test]
fn test_identity_rows() {
    let spec = TemplateSpec::from_options("", "", ",");
    assert_eq!(render(&spec, "a\nb\nc\n"), "a\nb\nc");
    assert_eq!(render(&spec, "x\r\ny"), "x\ny");
    assert_eq!(render(&spec, ""), "");
}

#[test]
fn test_row_template() {
    assert_eq!(render(&row("item: {{ . }}"), "a\nb\n"), "item: a\nitem: b");
    assert_eq!(render(&row("item: {{ line }}"), "a\nb\n"), "item: a\nitem: b");
}

#[test]
fn test_row_template_trailing_newline() {
    assert_eq!(render(&row("{{ . }}\n"), "a\nb"), "a\n\nb\n");
}

#[cfg(unix)]
#[test]
fn test_column_basename() {
    let spec = TemplateSpec::from_options("", "{{ basename . }}", "-");
    assert_eq!(render(&spec, "/x/a.go\n/y/b.go\n"), "a.go-b.go");
}

#[test]
fn test_column_no_trailing_separator() {
    let spec = TemplateSpec::from_options("", "\"{{ . }}\"", ", ");
    assert_eq!(render(&spec, "a\nb\nc"), "\"a\", \"b\", \"c\"");
}

#[test]
fn test_upper() {
    assert_eq!(render(&row("{{ upper . }}"), "hi"), "HI");
    assert_eq!(render(&row("{{ . | upper }}"), "hi"), "HI");
    assert_eq!(render(&row("{{ lower(line) }}"), "HI"), "hi");
}

#[test]
fn test_helpers_in_templates() {
    assert_eq!(render(&row(r#"{{ trimPrefix . "model_" }}"#), "model_user"), "user");
    assert_eq!(render(&row("{{ line | trimSuffix('.rs') }}"), "user.rs"), "user");
    assert_eq!(render(&row("{{ strip . }}"), "  padded  "), "padded");
    assert_eq!(render(&row(r#"{{ trim . "*" }}"#), "**x**"), "x");
    assert_eq!(render(&row("{{ ext . }}"), "a/b.txt"), ".txt");
    assert_eq!(render(&row("{{ split(line) | length }}"), "a b c"), "3");
    assert_eq!(render(&row(r#"{{ split(line, ",") | join("+") }}"#), "a,b"), "a+b");
}

#[cfg(unix)]
#[test]
fn test_path_helpers_in_templates() {
    assert_eq!(render(&row(r#"{{ join "src" . }}"#), "lib.rs"), "src/lib.rs");
    assert_eq!(render(&row("{{ dirname . }}"), "/x/a.go"), "/x");
}

#[test]
fn test_index_in_context() {
    assert_eq!(render(&row("{{ index }}={{ line }}"), "a\nb"), "0=a\n1=b");
}

#[test]
fn test_line_error_keeps_alignment() {
    // `trim` needs a cutset; every line fails and renders empty
    assert_eq!(render(&row("{{ trim(line) }}"), "a\nb\nc"), "\n\n");

    let spec = TemplateSpec::from_options("", "{{ trim(line) }}", ",");
    assert_eq!(render(&spec, "a\nb"), ",");
}

#[test]
fn test_compile_error() {
    let result = Renderer::compile(&row("{{ line "), HELPERS);
    assert!(matches!(result, Err(Error::MinijinjaError(_))));

    let result = Renderer::compile(&row("{% if %}"), HELPERS);
    assert!(result.is_err());
}
