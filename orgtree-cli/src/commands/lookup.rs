use orgtree_core::{Config, OrgChart, QueryError, RoleId, UserId};
use std::path::PathBuf;

use super::{input_path, join_ids, write_report};

pub fn handle_validate(
    config: &Config,
    file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = input_path(config, file);
    match OrgChart::from_path(&path) {
        Ok(chart) => {
            println!("✓ User/role data valid: {}", path.display());
            println!("  Users: {}", chart.store().user_count());
            println!("  Roles: {}", chart.store().role_count());
            let roots = chart
                .store()
                .roles()
                .filter(|r| chart.role(r.parent_id).is_none())
                .count();
            println!("  Root roles: {}", roots);
            let leaves = chart
                .store()
                .roles()
                .filter(|r| chart.is_leaf_role(r.id))
                .count();
            println!("  Leaf roles: {}", leaves);
        }
        Err(e) => {
            eprintln!("✗ Validation failed: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

pub fn handle_subordinates(
    config: &Config,
    user_id: i64,
    file: Option<PathBuf>,
    output: Option<PathBuf>,
    no_write: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let chart = OrgChart::from_path(&input_path(config, file))?;

    match chart.report_for(UserId(user_id)) {
        Ok(report) => {
            println!(
                "Found {} subordinates: {}",
                report.count,
                join_ids(&report)
            );
            for user in &report.subordinates {
                let role = chart
                    .role(user.role_id)
                    .map(|r| r.name.as_str())
                    .unwrap_or("?");
                println!("  {} {} ({})", user.id, user.name, role);
            }

            if !no_write {
                let path = output.unwrap_or_else(|| config.output_path());
                write_report(&path, &report)?;
                println!("Wrote result to {}", path.display());
            }
        }
        Err(QueryError::UnknownUser(id)) => {
            eprintln!("Invalid Employee ID: {}", id);
            std::process::exit(1);
        }
    }
    Ok(())
}

pub fn handle_descendants(
    config: &Config,
    role_ids: Vec<i64>,
    file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let chart = OrgChart::from_path(&input_path(config, file))?;
    let queried: Vec<RoleId> = role_ids.into_iter().map(RoleId).collect();
    let roles = sorted_descendants(&chart, &queried);

    let label = queried
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if roles.is_empty() {
        println!("No descendant roles for role(s) {}", label);
    } else {
        println!("Descendant roles of {} ({}):", label, roles.len());
        for id in roles {
            let name = chart.role(id).map(|r| r.name.as_str()).unwrap_or("?");
            println!("  {} {}", id, name);
        }
    }
    Ok(())
}

fn sorted_descendants(chart: &OrgChart, roles: &[RoleId]) -> Vec<RoleId> {
    let mut found: Vec<RoleId> = chart.descendant_roles_of_all(roles).into_iter().collect();
    found.sort_unstable();
    found
}
