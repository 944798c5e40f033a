//! End-to-end generation against the `User` fixture.

use gooptions_codegen::{
    CodegenError, FieldVisibility, GeneratorOptions, generate, generate_from_json,
    generate_from_xml, generate_to_file,
};
use gooptions_schema::{
    FieldDescriptor, PackageDescriptor, PackageDocument, ParamDescriptor, RecordDescriptor,
    SchemaError, StaticProvider, TypeDescriptor, XmlDescriptorProvider,
};
use std::path::Path;

const USER_XML: &str = include_str!("data/user.xml");
const USER_JSON: &str = include_str!("data/user.json");
const GOLDEN: &str = include_str!("data/user_options.go.golden");

fn field(name: &str, ty: TypeDescriptor) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        ty,
        tag: None,
    }
}

fn document(records: Vec<RecordDescriptor>) -> PackageDocument {
    PackageDocument {
        package: PackageDescriptor::new("example.com/app/config"),
        records,
    }
}

#[test]
fn test_xml_matches_golden() {
    let output = generate_from_xml(USER_XML, "User", GeneratorOptions::default())
        .expect("generate");
    assert_eq!(output, GOLDEN);
}

#[test]
fn test_json_matches_golden() {
    let output = generate_from_json(USER_JSON, "User", GeneratorOptions::default())
        .expect("generate");
    assert_eq!(output, GOLDEN);
}

#[test]
fn test_empty_record() {
    let output = generate_from_xml(USER_XML, "Org", GeneratorOptions::default())
        .expect("generate");
    assert!(!output.contains("import"));
    assert!(output.ends_with(
        "func (o *Org) with(options ...Option) *Org {\n\tfor _, option := range options {\n\t\toption(o)\n\t}\n\treturn o\n}\n"
    ));
}

#[test]
fn test_unknown_record() {
    let err = generate_from_xml(USER_XML, "Account", GeneratorOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Schema(SchemaError::RecordNotFound { ref name }) if name == "Account"
    ));
}

fn config_with_mutex(mutex_name: &str, tag: Option<&str>) -> StaticProvider {
    let mut mutex = field(
        mutex_name,
        TypeDescriptor::named(Some(PackageDescriptor::new("sync")), "Mutex"),
    );
    mutex.tag = tag.map(str::to_string);
    StaticProvider::new(document(vec![RecordDescriptor {
        name: "Config".to_string(),
        fields: vec![field("Port", TypeDescriptor::basic("int")), mutex],
    }]))
}

#[test]
fn test_ignored_field_not_imported() {
    let provider = config_with_mutex("Mu", Some(r#"json:"-" gooptions:"-""#));

    let output = generate(&provider, "Config", GeneratorOptions::default()).expect("generate");
    assert!(output.contains("func WithPort(port int) Option {"));
    assert!(!output.contains("WithMu"));
    assert!(!output.contains("import"));
}

#[test]
fn test_filtered_field_not_imported() {
    let provider = config_with_mutex("mu", None);

    let options = GeneratorOptions::default().visibility(FieldVisibility::ExportedOnly);
    let output = generate(&provider, "Config", options).expect("generate");
    assert!(output.contains("func WithPort(port int) Option {"));
    assert!(!output.contains("WithMu"));
    assert!(!output.contains("import"));

    let output = generate(&provider, "Config", GeneratorOptions::default()).expect("generate");
    assert!(output.contains("import (\n\t\"sync\"\n)\n"));
}

#[test]
fn test_non_identifier_package_name_rejected() {
    let provider = StaticProvider::new(document(vec![RecordDescriptor {
        name: "Config".to_string(),
        fields: vec![field(
            "Node",
            TypeDescriptor::named(Some(PackageDescriptor::new("gopkg.in/yaml.v3")), "Node"),
        )],
    }]));

    let err = generate(&provider, "Config", GeneratorOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Schema(SchemaError::Validation { .. })
    ));
}

#[test]
fn test_named_func_params_and_results() {
    let handler = TypeDescriptor::Func {
        params: vec![
            ParamDescriptor {
                name: Some("ctx".to_string()),
                ty: TypeDescriptor::named(Some(PackageDescriptor::new("context")), "Context"),
            },
            ParamDescriptor {
                name: Some("args".to_string()),
                ty: TypeDescriptor::Slice {
                    elem: Box::new(TypeDescriptor::Interface { methods: vec![] }),
                },
            },
        ],
        results: vec![
            ParamDescriptor {
                name: Some("n".to_string()),
                ty: TypeDescriptor::basic("int"),
            },
            ParamDescriptor {
                name: Some("err".to_string()),
                ty: TypeDescriptor::named(None, "error"),
            },
        ],
        variadic: true,
    };
    let provider = StaticProvider::new(document(vec![RecordDescriptor {
        name: "Config".to_string(),
        fields: vec![field("Handler", handler)],
    }]));

    let output = generate(&provider, "Config", GeneratorOptions::default()).expect("generate");
    assert!(output.contains(
        "func WithHandler(handler func(ctx context.Context, args ...interface{}) (n int, err error)) Option {"
    ));
}

#[test]
fn test_unsupported_shape_reports_path() {
    let provider = StaticProvider::new(document(vec![RecordDescriptor {
        name: "Config".to_string(),
        fields: vec![field(
            "Values",
            TypeDescriptor::Slice {
                elem: Box::new(TypeDescriptor::TypeParam {
                    name: "T".to_string(),
                }),
            },
        )],
    }]));

    let err = generate(&provider, "Config", GeneratorOptions::default()).unwrap_err();
    let CodegenError::Schema(SchemaError::UnsupportedShape { path, .. }) = &err else {
        panic!("expected unsupported shape, got {err:?}");
    };
    assert!(path.starts_with("Config.Values"));
}

#[test]
fn test_exported_only_options() {
    let options = GeneratorOptions::default()
        .visibility(FieldVisibility::ExportedOnly)
        .option_name("UserOption");
    let output = generate_from_xml(USER_XML, "User", options).expect("generate");

    assert!(!output.contains("WithEmail"));
    assert!(output.contains("func WithFor(for0 uintptr) UserOption {"));
    assert!(output.contains("func WithOrgs(orgs map[string]*Org) UserOption {"));
}

#[test]
fn test_generate_to_file_default_destination() {
    let dir = tempfile::tempdir().expect("tempdir");
    let provider = XmlDescriptorProvider::from_xml(USER_XML).expect("parse");

    let path = generate_to_file(
        &provider,
        "User",
        dir.path(),
        None,
        GeneratorOptions::default(),
    )
    .expect("generate");

    assert_eq!(path, dir.path().join("user_options.go"));
    assert_eq!(std::fs::read_to_string(&path).expect("read"), GOLDEN);
}

#[test]
fn test_generate_to_file_failure_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let provider = XmlDescriptorProvider::from_xml(USER_XML).expect("parse");

    let result = generate_to_file(
        &provider,
        "Missing",
        dir.path(),
        Some(Path::new("out/missing_options.go")),
        GeneratorOptions::default(),
    );

    assert!(result.is_err());
    assert!(!dir.path().join("out").exists());
}
