use itest_common::{access, ClassFileBuilder, JarBuilder};
use jar_dumper::filter::FilterConfiguration;
use jar_dumper::pipeline::PipelineOptions;
use jar_dumper::Error;

mod common;

use common::{dump, filters, foo, jar};

#[test]
fn show_modifiers() {
    let jar = jar([foo()]);
    let lines = dump(
        jar.path(),
        filters(FilterConfiguration {
            show_modifiers: true,
            ..Default::default()
        }),
    )
    .expect("dump failed");
    assert_eq!(
        lines,
        ["<com.ex.Foo: public static int bar(java.lang.String,java.util.List)>"]
    );
}

#[test]
fn skip_static() {
    let jar = jar([foo()]);
    let lines = dump(
        jar.path(),
        filters(FilterConfiguration {
            skip_static: true,
            ..Default::default()
        }),
    )
    .expect("dump failed");
    assert!(lines.is_empty(), "{lines:?}");
}

#[test]
fn no_flags_keeps_every_public_method() {
    let jar = jar([foo()
        .method(access::PUBLIC | access::FINAL | access::NATIVE, "hash", "()J")
        .method(access::PUBLIC | access::VARARGS, "of", "([Ljava/lang/Object;)V")
        .method(access::PRIVATE, "hidden", "()V")]);
    let lines = dump(jar.path(), PipelineOptions::default()).expect("dump failed");
    assert_eq!(
        lines,
        [
            "<com.ex.Foo: int bar(java.lang.String,java.util.List)>",
            "<com.ex.Foo: long hash()>",
            "<com.ex.Foo: void of(java.lang.Object[])>",
        ]
    );
}

#[test]
fn classes_are_sorted_by_name() {
    let jar = JarBuilder::new()
        .class(ClassFileBuilder::new("b/Second").method(access::PUBLIC, "z", "()V"))
        .class(ClassFileBuilder::new("a/First").method(access::PUBLIC, "y", "()V"))
        .entry(
            "copy/b/Second.class",
            ClassFileBuilder::new("b/Second")
                .method(access::PUBLIC, "x", "()V")
                .method(access::PUBLIC, "w", "()V")
                .build(),
        )
        .entry("b/Second.class.bak", ClassFileBuilder::new("b/Second").build())
        .directory("b/")
        .build();
    let lines = dump(
        jar.path(),
        PipelineOptions {
            declared_only: true,
            ..Default::default()
        },
    )
    .expect("dump failed");
    assert_eq!(
        lines,
        [
            "<a.First: void y()>",
            "<b.Second: void z()>",
            "<b.Second: void x()>",
            "<b.Second: void w()>",
        ]
    );
}

#[test]
fn inherited_methods() {
    let jar = jar([
        ClassFileBuilder::new("shapes/Square")
            .extends("shapes/Rectangle")
            .method(access::PUBLIC, "side", "()D"),
        ClassFileBuilder::new("shapes/Rectangle")
            .implements("shapes/Shape")
            .method(access::PUBLIC, "area", "()D"),
        ClassFileBuilder::new("shapes/Shape")
            .interface()
            .method(access::PUBLIC | access::ABSTRACT, "area", "()D")
            .method(access::PUBLIC | access::ABSTRACT, "sides", "()I"),
    ]);

    let inherited = dump(jar.path(), PipelineOptions::default()).expect("dump failed");
    assert_eq!(
        inherited,
        [
            "<shapes.Rectangle: double area()>",
            "<shapes.Rectangle: int sides()>",
            "<shapes.Shape: double area()>",
            "<shapes.Shape: int sides()>",
            "<shapes.Square: double side()>",
            "<shapes.Square: double area()>",
            "<shapes.Square: int sides()>",
        ]
    );

    let declared = dump(
        jar.path(),
        PipelineOptions {
            declared_only: true,
            ..Default::default()
        },
    )
    .expect("dump failed");
    assert_eq!(
        declared,
        [
            "<shapes.Rectangle: double area()>",
            "<shapes.Shape: double area()>",
            "<shapes.Shape: int sides()>",
            "<shapes.Square: double side()>",
        ]
    );
}

#[test]
fn skip_interface_and_abstract() {
    let jar = jar([
        ClassFileBuilder::new("shapes/Shape")
            .interface()
            .method(access::PUBLIC | access::ABSTRACT, "area", "()D"),
        ClassFileBuilder::new("shapes/Base")
            .access(access::PUBLIC | access::ABSTRACT)
            .method(access::PUBLIC | access::ABSTRACT, "draw", "()V")
            .method(access::PUBLIC, "erase", "()V"),
    ]);
    let skip_interface = dump(
        jar.path(),
        PipelineOptions {
            filters: FilterConfiguration {
                skip_interface: true,
                ..Default::default()
            },
            declared_only: true,
        },
    )
    .expect("dump failed");
    assert_eq!(
        skip_interface,
        ["<shapes.Base: void draw()>", "<shapes.Base: void erase()>"]
    );

    let skip_abstract = dump(
        jar.path(),
        PipelineOptions {
            filters: FilterConfiguration {
                skip_abstract: true,
                ..Default::default()
            },
            declared_only: true,
        },
    )
    .expect("dump failed");
    assert_eq!(skip_abstract, ["<shapes.Base: void erase()>"]);
}

#[test]
fn non_concrete_parameters() {
    let jar = jar([
        ClassFileBuilder::new("app/Service")
            .method(access::PUBLIC, "accept", "(Lapp/Handler;)V")
            .method(access::PUBLIC, "count", "(I[Lapp/Handler;)V")
            .method(access::PUBLIC, "load", "(Ljava/util/List;)V")
            .method(access::PUBLIC, "stop", "()V"),
        ClassFileBuilder::new("app/Handler").interface(),
    ]);
    let lines = dump(
        jar.path(),
        filters(FilterConfiguration {
            skip_methods_with_non_concrete_params: true,
            ..Default::default()
        }),
    )
    .expect("dump failed");
    assert_eq!(
        lines,
        [
            "<app.Service: void count(int,app.Handler[])>",
            "<app.Service: void load(java.util.List)>",
            "<app.Service: void stop()>",
        ]
    );
}

#[test]
fn member_class_names() {
    let jar = jar([ClassFileBuilder::new("a/Outer$Inner")
        .inner_class("a/Outer$Inner", Some("a/Outer"), Some("Inner"), access::PUBLIC)
        .method(access::PUBLIC, "self", "()La/Outer$Inner;")]);
    let lines = dump(jar.path(), PipelineOptions::default()).expect("dump failed");
    assert_eq!(lines, ["<a.Outer.Inner: a.Outer.Inner self()>"]);
}

#[test]
fn directories_are_archives_too() {
    let dir = JarBuilder::new()
        .class(foo())
        .class(ClassFileBuilder::new("com/ex/sub/Bar").method(access::PUBLIC, "run", "()V"))
        .entry("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\n")
        .build_directory();
    let lines = dump(dir.path(), PipelineOptions::default()).expect("dump failed");
    assert_eq!(
        lines,
        [
            "<com.ex.Foo: int bar(java.lang.String,java.util.List)>",
            "<com.ex.sub.Bar: void run()>",
        ]
    );
}

#[test]
fn malformed_class_ends_the_run() {
    let broken = ClassFileBuilder::new("com/ex/Broken").method(access::PUBLIC, "run", "()V");
    let jar = JarBuilder::new()
        .class(foo())
        .entry("com/ex/Broken.class", broken.build_with_truncated_method_table())
        .build();
    let error = dump(jar.path(), PipelineOptions::default()).expect_err("broken class");
    match &error {
        Error::MalformedClass { entry, .. } => {
            assert!(entry.starts_with("jar:file:"), "{entry}");
            assert!(entry.ends_with("!/com/ex/Broken.class"), "{entry}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(error.exit_code(), jar_dumper::error::EXIT_FAILURE);
}

#[test]
fn deeply_nested_arrays_end_the_run() {
    let descriptor = format!("({}I)V", "[".repeat(60_000));
    let jar = jar([foo(), ClassFileBuilder::new("Deep").method(access::PUBLIC, "m", &descriptor)]);
    let error = dump(jar.path(), PipelineOptions::default()).expect_err("too many dimensions");
    match &error {
        Error::MalformedClass { entry, .. } => assert!(entry.ends_with("!/Deep.class"), "{entry}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn bad_magic_ends_the_run() {
    let jar = JarBuilder::new()
        .entry("Fake.class", b"not a class file".to_vec())
        .build();
    let error = dump(jar.path(), PipelineOptions::default()).expect_err("not a class");
    assert!(matches!(error, Error::MalformedClass { .. }), "{error:?}");
}

#[test]
fn missing_archive() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = dump(&dir.path().join("missing.jar"), PipelineOptions::default())
        .expect_err("archive doesn't exist");
    assert!(matches!(error, Error::ArchiveUnreadable { .. }), "{error:?}");
    assert!(error.to_string().contains("missing.jar"), "{error}");
}

#[test]
fn corrupt_archive() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("corrupt.jar");
    std::fs::write(&path, b"PK\x03\x04 definitely not a zip").expect("write");
    let error = dump(&path, PipelineOptions::default()).expect_err("archive is corrupt");
    assert!(matches!(error, Error::ArchiveUnreadable { .. }), "{error:?}");
}
