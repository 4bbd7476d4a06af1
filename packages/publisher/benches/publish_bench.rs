use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sitecraft_model::{NodeId, Template, TemplateField, Tree};
use sitecraft_publisher::TemplateInterceptor;

/// Page with `sections` sections of 10 paragraphs, every other node templated
fn build_page(sections: usize) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let body = tree.create_element("body");
    tree.add_root(body).unwrap();

    for s in 0..sections {
        let section = tree.create_element("section");
        tree.append_child(body, section).unwrap();
        tree.node_mut(section).unwrap().add_class("block");
        tree.set_template(
            section,
            &Template::new()
                .with(TemplateField::Before, format!("<!-- section {} -->", s))
                .with(TemplateField::Classname, "published"),
        )
        .unwrap();

        for p in 0..10 {
            let para = tree.create_element("p");
            tree.append_child(section, para).unwrap();
            let text = tree.create_text("Lorem ipsum dolor sit amet");
            tree.append_child(para, text).unwrap();
            if p % 2 == 0 {
                tree.set_template(para, &Template::new().with(TemplateField::Style, "margin: 0"))
                    .unwrap();
            }
        }
    }

    (tree, body)
}

fn publish_cycle(c: &mut Criterion) {
    let (mut tree, body) = build_page(100);
    let mut interceptor = TemplateInterceptor::new();

    c.bench_function("publish_cycle_2100_nodes", |b| {
        b.iter(|| {
            interceptor.begin(&mut tree);
            let html = tree.to_html(black_box(body));
            interceptor.end(&mut tree);
            html
        })
    });
}

fn native_serialize(c: &mut Criterion) {
    let (tree, body) = build_page(100);

    c.bench_function("native_serialize_2100_nodes", |b| {
        b.iter(|| tree.to_html(black_box(body)))
    });
}

criterion_group!(benches, publish_cycle, native_serialize);
criterion_main!(benches);
