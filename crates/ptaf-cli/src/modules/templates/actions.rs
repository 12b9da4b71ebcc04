use anyhow::Context;
use ptaf_core::{resource_id, strip_read_only, strip_rule, ResourceKind};
use serde_json::Value;

use super::http::{fetch_rules, update_rule};
use crate::cli_args::*;
use crate::modules::auth::SessionManager;
use crate::modules::resources::{
    create_resource, item_label, list_resources, snapshot_dir, write_snapshot, BatchReport,
};
use crate::modules::system::CommandContext;
use crate::modules::tenants::resolve_tenant;

pub(crate) async fn handle_templates(
    args: TemplatesArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        TemplatesCommand::List(args) => {
            let tenant = resolve_tenant(ctx.session, &args.tenant).await?;
            let templates = ctx
                .session
                .with_tenant(&tenant.id, async |session: &mut SessionManager| {
                    list_resources(session, ResourceKind::PolicyTemplates).await
                })
                .await?
                .settle()?;
            print_template_table(&templates);
        }
        TemplatesCommand::Export(args) => {
            let tenant = resolve_tenant(ctx.session, &args.tenant).await?;
            let dir = snapshot_dir(args.out, &tenant);
            let (templates, report) = ctx
                .session
                .with_tenant(&tenant.id, async |session: &mut SessionManager| {
                    fetch_templates_with_rules(session).await
                })
                .await?
                .settle()?;
            let path = write_snapshot(&dir, ResourceKind::PolicyTemplates, &templates)?;
            println!("Wrote {} template(s) to {}", templates.len(), path.display());
            report.print_failures();
            report.ensure_success()?;
        }
        TemplatesCommand::Copy(args) => {
            let source = resolve_tenant(ctx.session, &args.from).await?;
            let target = resolve_tenant(ctx.session, &args.to).await?;
            let (templates, mut report) = ctx
                .session
                .with_tenant(&source.id, async |session: &mut SessionManager| {
                    fetch_templates_with_rules(session).await
                })
                .await?
                .settle()
                .with_context(|| format!("failed to read templates from {}", source.label()))?;
            let selected = select_by_name(templates, &args.name);
            if selected.is_empty() {
                report.print_failures();
                anyhow::bail!("no matching templates in {}", source.label());
            }
            let copied = ctx
                .session
                .with_tenant(&target.id, async |session: &mut SessionManager| {
                    import_templates(session, &selected).await
                })
                .await?
                .settle();
            report.merge(copied);
            report.print("Copied");
            report.ensure_success()?;
        }
    }
    Ok(())
}

/// User templates of the current tenant, each with its rules under `rules`.
/// A template whose rules cannot be read is left out and recorded as failed
/// in the returned report; only a failed listing is an error.
pub(crate) async fn fetch_templates_with_rules(
    session: &mut SessionManager,
) -> anyhow::Result<(Vec<Value>, BatchReport)> {
    let listed = list_resources(session, ResourceKind::PolicyTemplates)
        .await
        .context("failed to list policy templates")?;
    let mut templates = Vec::with_capacity(listed.len());
    let mut report = BatchReport::default();
    for (index, mut template) in listed.into_iter().enumerate() {
        let Some(id) = resource_id(&template).map(str::to_string) else {
            templates.push(template);
            continue;
        };
        match fetch_rules(session, &id).await {
            Ok(rules) => {
                if let Value::Object(map) = &mut template {
                    map.insert("rules".to_string(), Value::Array(rules));
                }
                templates.push(template);
            }
            Err(err) => report.record_failure(
                item_label(&template, index),
                &format!("failed to fetch rules of template {id}: {err}"),
            ),
        }
    }
    Ok((templates, report))
}

/// Creates each template in the current tenant, then applies its rule
/// overrides to the new template by rule id.
pub(crate) async fn import_templates(
    session: &mut SessionManager,
    templates: &[Value],
) -> BatchReport {
    let mut report = BatchReport::default();
    for (index, template) in templates.iter().enumerate() {
        let label = item_label(template, index);
        let mut body = template.clone();
        strip_read_only(ResourceKind::PolicyTemplates, &mut body);
        let created = match create_resource(session, ResourceKind::PolicyTemplates, &body).await {
            Ok(created) => created,
            Err(err) => {
                report.record_failure(label, &err);
                continue;
            }
        };
        let Some(new_id) = resource_id(&created) else {
            report.record_failure(label, &"server did not return the new template id");
            continue;
        };

        let rules = template
            .get("rules")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let mut rule_failures = 0;
        for rule in rules {
            let Some(rule_id) = resource_id(rule) else {
                continue;
            };
            let mut rule_body = rule.clone();
            strip_rule(&mut rule_body);
            if let Err(err) = update_rule(session, new_id, rule_id, &rule_body).await {
                rule_failures += 1;
                report.record_failure(format!("{label} / rule {rule_id}"), &err);
            }
        }
        if rule_failures == 0 {
            report.record_success(label);
        }
    }
    report
}

fn select_by_name(templates: Vec<Value>, names: &[String]) -> Vec<Value> {
    if names.is_empty() {
        return templates;
    }
    templates
        .into_iter()
        .filter(|template| {
            template
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| names.iter().any(|wanted| wanted.eq_ignore_ascii_case(name)))
        })
        .collect()
}

fn print_template_table(templates: &[Value]) {
    if templates.is_empty() {
        println!("No user templates");
        return;
    }
    let rows: Vec<(&str, &str)> = templates
        .iter()
        .map(|template| {
            (
                resource_id(template).unwrap_or("-"),
                template.get("name").and_then(Value::as_str).unwrap_or("-"),
            )
        })
        .collect();
    let id_width = rows
        .iter()
        .map(|(id, _)| id.len())
        .max()
        .unwrap_or(0)
        .max("ID".len());
    println!("{:<id_width$}  NAME", "ID", id_width = id_width);
    for (id, name) in rows {
        println!("{:<id_width$}  {}", id, name, id_width = id_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_by_name_is_case_insensitive() {
        let templates = vec![json!({"name": "Base"}), json!({"name": "Strict"}), json!({})];
        let selected = select_by_name(templates.clone(), &["strict".to_string()]);
        assert_eq!(selected, vec![json!({"name": "Strict"})]);
        assert_eq!(select_by_name(templates, &[]).len(), 3);
    }
}
