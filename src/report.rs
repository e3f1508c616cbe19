//! Aggregation across compilation units and rendering of the two CSV
//! reports.
//!
//! Rows are flattened into owned [`UnitReport`] values as each unit is
//! processed, so nothing here borrows a compilation. Rendering sorts
//! units by logical project name, containers by display text, and
//! methods by display text (all ordinal, ascending) so the output is
//! reproducible and diff-friendly regardless of discovery order.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};

use crate::classify::{ClassifyError, ExtensionContainer};
use crate::project_key::ProjectKey;
use crate::symbols::Compilation;

pub const TYPE_REPORT_FILE_NAME: &str = "Report-extension-types.csv";
pub const METHOD_REPORT_FILE_NAME: &str = "Report-extension-methods.csv";

/// Display-ready rows for one compilation unit.
#[derive(Debug, Clone)]
pub struct UnitReport {
    pub key: ProjectKey,
    pub assembly: String,
    pub containers: Vec<ContainerRow>,
}

#[derive(Debug, Clone)]
pub struct ContainerRow {
    pub display_text: String,
    pub is_public: bool,
    pub contains_non_extension_members: bool,
    pub all_extensions_have_same_this_parameter_type: bool,
    pub methods: Vec<MethodRow>,
}

#[derive(Debug, Clone)]
pub struct MethodRow {
    pub display_text: String,
    pub is_public: bool,
    pub is_generic: bool,
    pub reduced_form_parameter_count: usize,
    pub this_parameter_type: String,
    pub this_parameter_uses_type_parameter: bool,
    pub this_parameter_is_error_type: bool,
    pub this_parameter_is_generic_type: bool,
    pub this_parameter_is_value_type: bool,
    pub this_parameter_ref_kind: &'static str,
}

/// Flatten one unit's discovered containers into owned report rows.
///
/// This is where the containers' lazy collections are materialized, so
/// a classifier assumption violation surfaces here and aborts the whole
/// unit rather than producing a partially wrong report.
pub fn summarize_unit(
    key: ProjectKey,
    comp: &Compilation,
    containers: &[ExtensionContainer<'_>],
) -> Result<UnitReport, ClassifyError> {
    let mut container_rows = Vec::with_capacity(containers.len());
    for container in containers {
        let methods = container.extension_methods()?;
        let mut method_rows = Vec::with_capacity(methods.len());
        for method in methods {
            method_rows.push(MethodRow {
                display_text: method.display_text().to_string(),
                is_public: method.is_public(),
                is_generic: method.is_generic(),
                reduced_form_parameter_count: method.reduced_form_parameter_count(),
                this_parameter_type: comp.display_type(method.this_parameter_type()),
                this_parameter_uses_type_parameter: method
                    .this_parameter_uses_type_parameter(),
                this_parameter_is_error_type: method.this_parameter_is_error_type(),
                this_parameter_is_generic_type: method.this_parameter_is_generic_type(),
                this_parameter_is_value_type: method.this_parameter_is_value_type(),
                this_parameter_ref_kind: method.this_parameter_ref_kind().label(),
            });
        }
        container_rows.push(ContainerRow {
            display_text: container.display_text().to_string(),
            is_public: container.is_public(),
            contains_non_extension_members: container.contains_non_extension_members(),
            all_extensions_have_same_this_parameter_type: container
                .all_extensions_have_same_this_parameter_type()?,
            methods: method_rows,
        });
    }
    Ok(UnitReport {
        key,
        assembly: comp.assembly.to_string(),
        containers: container_rows,
    })
}

/// Render both report tables from the collected units.
///
/// Sorting happens here: units by logical name, then containers and
/// methods by display text, all ordinal. The sort is stable, so units
/// with equal names keep their discovery order.
pub fn render<W1: Write, W2: Write>(
    mut units: Vec<UnitReport>,
    type_out: &mut W1,
    method_out: &mut W2,
) -> io::Result<()> {
    units.sort_by(|a, b| a.key.name.cmp(&b.key.name));
    for unit in &mut units {
        unit.containers
            .sort_by(|a, b| a.display_text.cmp(&b.display_text));
        for container in &mut unit.containers {
            container
                .methods
                .sort_by(|a, b| a.display_text.cmp(&b.display_text));
        }
    }

    write_line(
        type_out,
        &[
            Field::Text("Assembly"),
            Field::Text("TargetFramework"),
            Field::Text("Type"),
            Field::Text("IsPublic"),
            Field::Text("ExtensionMethodCount"),
            Field::Text("ContainsNonExtensionMembers"),
            Field::Text("AllExtensionsHaveSameThisParameterType"),
        ],
    )?;
    write_line(
        method_out,
        &[
            Field::Text("Assembly"),
            Field::Text("TargetFramework"),
            Field::Text("Type"),
            Field::Text("Method"),
            Field::Text("IsPublic"),
            Field::Text("IsGeneric"),
            Field::Text("ReducedFormParameterCount"),
            Field::Text("ThisParameterType"),
            Field::Text("ThisParameterUsesTypeParameter"),
            Field::Text("ThisParameterIsErrorType"),
            Field::Text("ThisParameterIsGenericType"),
            Field::Text("ThisParameterIsValueType"),
            Field::Text("ThisParameterIsRefKind"),
        ],
    )?;

    for unit in &units {
        for container in &unit.containers {
            write_line(
                type_out,
                &[
                    Field::Text(&unit.assembly),
                    Field::Text(&unit.key.target_framework),
                    Field::Text(&container.display_text),
                    Field::Bool(container.is_public),
                    Field::Count(container.methods.len()),
                    Field::Bool(container.contains_non_extension_members),
                    Field::Bool(container.all_extensions_have_same_this_parameter_type),
                ],
            )?;
            for method in &container.methods {
                write_line(
                    method_out,
                    &[
                        Field::Text(&unit.assembly),
                        Field::Text(&unit.key.target_framework),
                        Field::Text(&container.display_text),
                        Field::Text(&method.display_text),
                        Field::Bool(method.is_public),
                        Field::Bool(method.is_generic),
                        Field::Count(method.reduced_form_parameter_count),
                        Field::Text(&method.this_parameter_type),
                        Field::Bool(method.this_parameter_uses_type_parameter),
                        Field::Bool(method.this_parameter_is_error_type),
                        Field::Bool(method.this_parameter_is_generic_type),
                        Field::Bool(method.this_parameter_is_value_type),
                        Field::Text(method.this_parameter_ref_kind),
                    ],
                )?;
            }
        }
    }
    Ok(())
}

/// Write both report files into `dir`. The files are always produced,
/// header-only when `units` is empty.
pub fn write_reports(dir: &Utf8Path, units: Vec<UnitReport>) -> io::Result<(Utf8PathBuf, Utf8PathBuf)> {
    let type_path = dir.join(TYPE_REPORT_FILE_NAME);
    let method_path = dir.join(METHOD_REPORT_FILE_NAME);
    let mut type_out = BufWriter::new(File::create(&type_path)?);
    let mut method_out = BufWriter::new(File::create(&method_path)?);
    render(units, &mut type_out, &mut method_out)?;
    type_out.flush()?;
    method_out.flush()?;
    Ok((type_path, method_path))
}

/// One value in a report row. Only text fields are subject to the
/// quoting rule; booleans and counts are emitted verbatim.
pub enum Field<'a> {
    Text(&'a str),
    Bool(bool),
    Count(usize),
}

/// Write one row in the minimal-quoting dialect: a text field that
/// contains the separator or a space is wrapped in double quotes, with
/// embedded quotes doubled; everything else is emitted as-is. The
/// dialect deliberately does not quote on newlines.
pub fn write_line<W: Write>(out: &mut W, fields: &[Field<'_>]) -> io::Result<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.write_all(b",")?;
        }
        match field {
            Field::Text(text) => {
                let quote = text.contains(',') || text.contains(' ');
                if quote {
                    out.write_all(b"\"")?;
                }
                for ch in text.chars() {
                    if ch == '"' {
                        out.write_all(b"\"\"")?;
                    } else {
                        let mut buf = [0u8; 4];
                        out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
                    }
                }
                if quote {
                    out.write_all(b"\"")?;
                }
            }
            Field::Bool(value) => {
                out.write_all(if *value { b"True" } else { b"False" })?;
            }
            Field::Count(value) => {
                write!(out, "{value}")?;
            }
        }
    }
    out.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;

    use super::*;

    fn line(fields: &[Field<'_>]) -> String {
        let mut buf = Vec::new();
        write_line(&mut buf, fields).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn plain_fields_are_unquoted() {
        assert_eq!(
            line(&[Field::Text("Acme.Extensions"), Field::Bool(true), Field::Count(3)]),
            "Acme.Extensions,True,3\n"
        );
    }

    #[test]
    fn separator_or_space_triggers_quoting() {
        assert_eq!(line(&[Field::Text("a,b")]), "\"a,b\"\n");
        assert_eq!(line(&[Field::Text("a b")]), "\"a b\"\n");
        assert_eq!(
            line(&[Field::Text(
                "Foo(System.Collections.Generic.IEnumerable<T> source, T value)"
            )]),
            "\"Foo(System.Collections.Generic.IEnumerable<T> source, T value)\"\n"
        );
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(line(&[Field::Text("say \"hi\" now")]), "\"say \"\"hi\"\" now\"\n");
        // A quote alone does not force quoting; the dialect only quotes
        // on separator or space.
        assert_eq!(line(&[Field::Text("\"bare\"")]), "\"\"bare\"\"\n");
    }

    fn unit(name: &str, containers: Vec<ContainerRow>) -> UnitReport {
        UnitReport {
            key: ProjectKey {
                file_path: Utf8PathBuf::from(format!("/src/{name}/{name}.csproj")),
                name: name.to_string(),
                target_framework: "net9.0".to_string(),
            },
            assembly: format!("{name}, Version=0.0.0.0, Culture=neutral, PublicKeyToken=null"),
            containers,
        }
    }

    fn container(display: &str, methods: Vec<MethodRow>) -> ContainerRow {
        ContainerRow {
            display_text: display.to_string(),
            is_public: true,
            contains_non_extension_members: false,
            all_extensions_have_same_this_parameter_type: true,
            methods,
        }
    }

    fn method(display: &str) -> MethodRow {
        MethodRow {
            display_text: display.to_string(),
            is_public: true,
            is_generic: false,
            reduced_form_parameter_count: 0,
            this_parameter_type: "int".to_string(),
            this_parameter_uses_type_parameter: false,
            this_parameter_is_error_type: false,
            this_parameter_is_generic_type: false,
            this_parameter_is_value_type: true,
            this_parameter_ref_kind: "None",
        }
    }

    fn rendered(units: Vec<UnitReport>) -> (String, String) {
        let mut types = Vec::new();
        let mut methods = Vec::new();
        render(units, &mut types, &mut methods).unwrap();
        (
            String::from_utf8(types).unwrap(),
            String::from_utf8(methods).unwrap(),
        )
    }

    #[test]
    fn empty_input_still_produces_headers() {
        let (types, methods) = rendered(vec![]);
        assert_eq!(
            types,
            "Assembly,TargetFramework,Type,IsPublic,ExtensionMethodCount,\
             ContainsNonExtensionMembers,AllExtensionsHaveSameThisParameterType\n"
        );
        assert!(methods.starts_with("Assembly,TargetFramework,Type,Method,"));
        assert_eq!(methods.lines().count(), 1);
    }

    #[test]
    fn rows_are_sorted_by_unit_container_and_method() {
        let units = vec![
            unit(
                "Zeta",
                vec![container("B.Foo", vec![method("b()"), method("a()")])],
            ),
            unit("Alpha", vec![container("A.Bar", vec![method("x()")])]),
        ];
        let (types, methods) = rendered(units);

        let type_rows: Vec<&str> = types.lines().skip(1).collect();
        assert!(type_rows[0].contains("A.Bar"));
        assert!(type_rows[1].contains("B.Foo"));

        let method_rows: Vec<&str> = methods.lines().skip(1).collect();
        assert!(method_rows[0].contains("x()"));
        assert!(method_rows[1].contains("a()"));
        assert!(method_rows[2].contains("b()"));
    }

    #[test]
    fn method_rows_repeat_unit_and_container_context() {
        let units = vec![unit("Lib", vec![container("Lib.Ext", vec![method("m()")])])];
        let (_, methods) = rendered(units);
        let row = methods.lines().nth(1).unwrap();
        assert!(row.starts_with(
            "\"Lib, Version=0.0.0.0, Culture=neutral, PublicKeyToken=null\",net9.0,Lib.Ext,m(),"
        ));
        assert!(row.ends_with("True,None"));
    }

    #[test]
    fn write_reports_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let dir_path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let (types, methods) = write_reports(&dir_path, vec![]).unwrap();
        assert!(types.as_std_path().exists());
        assert!(methods.as_std_path().exists());
        let contents = std::fs::read_to_string(types.as_std_path()).unwrap();
        assert!(contents.starts_with("Assembly,TargetFramework,Type,"));
    }
}
