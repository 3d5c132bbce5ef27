use std::fmt::Write;

use scgen::{
    descriptor::{FieldDescriptor, MetaOption, ModelDescriptor},
    variant::OutputVariant,
};

use crate::{
    error::Error,
    util::{file_stem, is_identifier, is_namespace, GENERATED_DIR},
};

const GENERATED_WARNING: &str = "\
//WARNING: THIS FILE IS GENERATED AUTOMATICALLY AND MAY BE OVERWRITTEN.
//IF YOU WISH TO MAKE CHANGES, SUBCLASS THE MODEL AND MAKE CHANGES THERE.
";
const PRIMARY_KEY: &str = "primaryKey: 'pk'";

/// Renders the generated record definition of a model.
///
/// The whole descriptor is validated before any text is produced.
pub fn render(descriptor: &ModelDescriptor, variant: OutputVariant) -> Result<String, Error> {
    validate(descriptor)?;

    let ident = variant.record_ident(&descriptor.app_label, &descriptor.model_name);
    let mut js = String::new();

    writeln!(js, "{}", GENERATED_WARNING)?;
    writeln!(js, "{} = SC.Record.extend({{", ident)?;
    for field in &descriptor.fields {
        write_field(&mut js, field)?;
    }
    writeln!(js, "{}", PRIMARY_KEY)?;
    writeln!(js, "}});")?;

    if variant.uses_mixin() {
        write_mixin(&mut js, &ident, &descriptor.meta_options)?;
    } else {
        for option in &descriptor.meta_options {
            writeln!(js, "{}.{} = {};", ident, option.name, option.value)?;
        }
    }

    Ok(js)
}

/// Renders a model with a variant given by name, eg. `"mixin"` or `"b"`.
pub fn render_named(descriptor: &ModelDescriptor, variant: &str) -> Result<String, Error> {
    let variant: OutputVariant = variant.parse()?;
    render(descriptor, variant)
}

/// Renders the hand-editable subclass of a generated record.
pub fn render_subclass(
    descriptor: &ModelDescriptor,
    variant: OutputVariant,
) -> Result<String, Error> {
    validate_names(descriptor)?;

    let ModelDescriptor {
        app_label,
        model_name,
        ..
    } = descriptor;
    let mut js = String::new();

    writeln!(
        js,
        "sc_require('{}/{}');",
        GENERATED_DIR,
        file_stem(model_name)
    )?;
    writeln!(js)?;
    writeln!(
        js,
        "{app}.{model} = {ident}.extend(",
        app = app_label,
        model = model_name,
        ident = variant.record_ident(app_label, model_name),
    )?;
    writeln!(
        js,
        "/** @scope {}.{}.prototype */ {{",
        app_label, model_name
    )?;
    writeln!(js)?;
    writeln!(js, "}});")?;

    Ok(js)
}

/// Renders the `core.js` of an app, which creates its namespace.
pub fn render_core(app_label: &str) -> Result<String, Error> {
    check("app label", app_label, is_namespace)?;

    let mut js = String::new();

    writeln!(js, "{}", GENERATED_WARNING)?;
    writeln!(js, "{} = SC.Object.create(", app_label)?;
    writeln!(js, "/** @scope {}.prototype */ {{", app_label)?;
    writeln!(js, "NAMESPACE: '{}'", app_label)?;
    writeln!(js, "}});")?;

    Ok(js)
}

/// Renders the Buildfile of the wrapper framework, requiring every app framework.
pub fn render_buildfile(project: &str, frameworks: &[String]) -> Result<String, Error> {
    check("project", project, is_identifier)?;
    for framework in frameworks {
        check("framework", framework, is_identifier)?;
    }

    let mut rb = String::new();

    writeln!(rb, "# WARNING: THIS FILE IS GENERATED AUTOMATICALLY AND MAY BE OVERWRITTEN.")?;
    writeln!(rb)?;
    writeln!(rb, "config :{}, :required => [", project)?;
    for (i, framework) in frameworks.iter().enumerate() {
        write!(rb, "  :{}", framework)?;

        if i < frameworks.len() - 1 {
            writeln!(rb, ",")?;
        } else {
            writeln!(rb)?;
        }
    }
    writeln!(rb, "]")?;

    Ok(rb)
}

/// Checks every identifier the descriptor contributes to the output.
pub fn validate(descriptor: &ModelDescriptor) -> Result<(), Error> {
    validate_names(descriptor)?;

    for field in &descriptor.fields {
        check("field name", &field.name, is_identifier)?;
    }
    for option in &descriptor.meta_options {
        check("meta option name", &option.name, is_identifier)?;
    }

    Ok(())
}

fn validate_names(descriptor: &ModelDescriptor) -> Result<(), Error> {
    check("app label", &descriptor.app_label, is_namespace)?;
    check("model name", &descriptor.model_name, is_identifier)
}

fn check(kind: &'static str, name: &str, is_valid: fn(&str) -> bool) -> Result<(), Error> {
    if is_valid(name) {
        Ok(())
    } else {
        Err(Error::MalformedDescriptor {
            kind,
            name: name.to_string(),
        })
    }
}

fn write_field(js: &mut String, field: &FieldDescriptor) -> Result<(), Error> {
    if !field.comments.is_empty() {
        writeln!(js, "/**")?;
        writeln!(js, "{}", field.comments.replace("*/", "*\\/"))?;
        writeln!(js, "*/")?;
    }
    writeln!(
        js,
        "{name}: {record}({ty}, {attributes}),",
        name = field.name,
        record = field.record_kind,
        ty = field.js_type,
        attributes = field.attributes,
    )?;

    Ok(())
}

fn write_mixin(js: &mut String, ident: &str, options: &[MetaOption]) -> Result<(), Error> {
    writeln!(js, "SC.mixin({}, {{", ident)?;
    for (i, option) in options.iter().enumerate() {
        write!(js, "{}", option)?;

        if i < options.len() - 1 {
            writeln!(js, ",")?;
        } else {
            writeln!(js)?;
        }
    }
    writeln!(js, "}});")?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use scgen::prelude::*;

    fn post() -> ModelDescriptor {
        ModelDescriptor::new("Blog", "Post")
            .field(FieldDescriptor::new("title", "String").record_kind("attr"))
            .meta("lastFetchKey", "'updated'")
    }

    fn poll() -> ModelDescriptor {
        ModelDescriptor::new("Polls", "Poll")
            .field(
                FieldDescriptor::new("question", "Django.CharField")
                    .attributes(r#"{"key": "question", "maxLength": 255}"#)
                    .comments(["@type String"]),
            )
            .field(
                FieldDescriptor::new("author", "'Auth.User'")
                    .record_kind("SC.Record.toOne")
                    .attributes(r#"{"key": "author"}"#)
                    .comments(["The author of the poll.", "@type Auth.User"]),
            )
            .meta("resourceURL", "'/api/polls/poll/'")
            .meta("ordering", "['-pub_date']")
    }

    #[test]
    fn assign() {
        let js = render(&post(), OutputVariant::Assign).unwrap();
        assert_eq!(
            js,
            r#"//WARNING: THIS FILE IS GENERATED AUTOMATICALLY AND MAY BE OVERWRITTEN.
//IF YOU WISH TO MAKE CHANGES, SUBCLASS THE MODEL AND MAKE CHANGES THERE.

Blog.GeneratedPost = SC.Record.extend({
title: attr(String, ),
primaryKey: 'pk'
});
Blog.GeneratedPost.lastFetchKey = 'updated';
"#
        );
    }

    #[test]
    fn mixin() {
        let js = render(&poll(), OutputVariant::Mixin).unwrap();
        assert_eq!(
            js,
            r#"//WARNING: THIS FILE IS GENERATED AUTOMATICALLY AND MAY BE OVERWRITTEN.
//IF YOU WISH TO MAKE CHANGES, SUBCLASS THE MODEL AND MAKE CHANGES THERE.

Polls.GeneratedPoll = SC.Record.extend({
/**
@type String
*/
question: SC.Record.attr(Django.CharField, {"key": "question", "maxLength": 255}),
/**
The author of the poll.

@type Auth.User
*/
author: SC.Record.toOne('Auth.User', {"key": "author"}),
primaryKey: 'pk'
});
SC.mixin(Polls.GeneratedPoll, {
resourceURL: '/api/polls/poll/',
ordering: ['-pub_date']
});
"#
        );
    }

    #[test]
    fn private_differs_only_by_ident() {
        let assign = render(&poll(), OutputVariant::Assign).unwrap();
        let private = render(&poll(), OutputVariant::Private).unwrap();

        assert!(private.contains("Polls._Poll = SC.Record.extend({"));
        assert!(private.contains("Polls._Poll.ordering = ['-pub_date'];"));
        assert!(!private.contains("GeneratedPoll"));
        assert_eq!(assign.replace("Polls.GeneratedPoll", "Polls._Poll"), private);
    }

    #[test]
    fn deterministic() {
        for variant in OutputVariant::ALL {
            assert_eq!(
                render(&poll(), variant).unwrap(),
                render(&poll(), variant).unwrap()
            );
        }
    }

    #[test]
    fn fields_keep_order() {
        let js = render(&poll(), OutputVariant::Assign).unwrap();
        let declarations: Vec<_> = js
            .lines()
            .filter(|line| line.contains(": SC.Record."))
            .collect();

        assert_eq!(declarations.len(), 2);
        assert!(declarations[0].starts_with("question: "));
        assert!(declarations[1].starts_with("author: "));
    }

    #[test]
    fn meta_entries() {
        let mixin = render(&poll(), OutputVariant::Mixin).unwrap();
        let block = mixin.split("SC.mixin(").nth(1).unwrap();
        assert_eq!(block.matches(",\n").count(), 1);
        assert!(block.contains("ordering: ['-pub_date']\n});"));

        let assign = render(&poll(), OutputVariant::Assign).unwrap();
        let statements = assign
            .lines()
            .filter(|line| line.starts_with("Polls.GeneratedPoll.") && line.ends_with(';'))
            .count();
        assert_eq!(statements, 2);
    }

    #[test]
    fn empty_model() {
        let tag = ModelDescriptor::new("Blog", "Tag");

        assert_eq!(
            render(&tag, OutputVariant::Private).unwrap(),
            r#"//WARNING: THIS FILE IS GENERATED AUTOMATICALLY AND MAY BE OVERWRITTEN.
//IF YOU WISH TO MAKE CHANGES, SUBCLASS THE MODEL AND MAKE CHANGES THERE.

Blog._Tag = SC.Record.extend({
primaryKey: 'pk'
});
"#
        );
        assert!(render(&tag, OutputVariant::Mixin)
            .unwrap()
            .ends_with("primaryKey: 'pk'\n});\nSC.mixin(Blog.GeneratedTag, {\n});\n"));
    }

    #[test]
    fn malformed_descriptor() {
        let empty_field = post().field(FieldDescriptor::new("", "String"));
        assert!(matches!(
            render(&empty_field, OutputVariant::Mixin),
            Err(Error::MalformedDescriptor { kind: "field name", .. })
        ));

        let bad_option = post().meta("last-fetch", "1");
        assert!(matches!(
            render(&bad_option, OutputVariant::Assign),
            Err(Error::MalformedDescriptor { kind: "meta option name", name }) if name == "last-fetch"
        ));

        let bad_model = ModelDescriptor::new("Blog", "Blog Post");
        assert!(matches!(
            render(&bad_model, OutputVariant::Assign),
            Err(Error::MalformedDescriptor { kind: "model name", .. })
        ));
    }

    #[test]
    fn duplicate_fields_are_rendered() {
        let twice = post().field(FieldDescriptor::new("title", "String").record_kind("attr"));
        let js = render(&twice, OutputVariant::Assign).unwrap();
        assert_eq!(js.matches("title: attr(String, ),").count(), 2);
    }

    #[test]
    fn named_variant() {
        assert_eq!(
            render_named(&post(), "b").unwrap(),
            render(&post(), OutputVariant::Assign).unwrap()
        );
        assert!(matches!(
            render_named(&post(), "fork"),
            Err(Error::UnsupportedVariant(name)) if name == "fork"
        ));
    }

    #[test]
    fn subclass() {
        let descriptor = ModelDescriptor::new("Blog", "BlogPost");

        assert_eq!(
            render_subclass(&descriptor, OutputVariant::Mixin).unwrap(),
            r#"sc_require('_generated/blog_post');

Blog.BlogPost = Blog.GeneratedBlogPost.extend(
/** @scope Blog.BlogPost.prototype */ {

});
"#
        );
        assert!(render_subclass(&descriptor, OutputVariant::Private)
            .unwrap()
            .contains("Blog.BlogPost = Blog._BlogPost.extend("));
    }

    #[test]
    fn comments_cannot_close_the_block() {
        let descriptor = ModelDescriptor::new("Blog", "Post").field(
            FieldDescriptor::new("pattern", "String").comments(["Matches /* and */ literally."]),
        );
        let js = render(&descriptor, OutputVariant::Assign).unwrap();

        assert!(js.contains("/**\nMatches /* and *\\/ literally.\n*/\npattern: "));
        assert_eq!(js.matches("*/").count(), 1);
    }

    #[test]
    fn core() {
        assert_eq!(
            render_core("Polls").unwrap(),
            r#"//WARNING: THIS FILE IS GENERATED AUTOMATICALLY AND MAY BE OVERWRITTEN.
//IF YOU WISH TO MAKE CHANGES, SUBCLASS THE MODEL AND MAKE CHANGES THERE.

Polls = SC.Object.create(
/** @scope Polls.prototype */ {
NAMESPACE: 'Polls'
});
"#
        );
        assert!(matches!(
            render_core("Who's"),
            Err(Error::MalformedDescriptor { kind: "app label", .. })
        ));
    }

    #[test]
    fn buildfile() {
        let frameworks = vec!["polls".to_string(), "auth".to_string()];

        assert_eq!(
            render_buildfile("mysite", &frameworks).unwrap(),
            r#"# WARNING: THIS FILE IS GENERATED AUTOMATICALLY AND MAY BE OVERWRITTEN.

config :mysite, :required => [
  :polls,
  :auth
]
"#
        );
        assert!(render_buildfile("mysite", &[])
            .unwrap()
            .ends_with("config :mysite, :required => [\n]\n"));
        assert!(matches!(
            render_buildfile("my-site", &frameworks),
            Err(Error::MalformedDescriptor { kind: "project", .. })
        ));
    }
}
