//! Networking deep dive: VCNs with subnets, route tables, security lists
//! and network security groups.

use crate::utils;
use colored::Colorize;
use ocikit_core::Profile;
use ocikit_oci::{OciCli, SecurityRule};

pub async fn handle_show(profile: &str, compartment: &str, show_ocids: bool) -> anyhow::Result<()> {
    let profile = Profile::load(profile)?;
    let oci = OciCli::new(&profile.name);

    let compartments = oci.list_compartments(&profile.tenancy).await?;
    let (cpt_id, _) = utils::resolve_compartment(&profile.tenancy, &compartments, compartment)?;

    for vcn in oci.list_vcns(&cpt_id).await? {
        println!();
        let dns = vcn
            .dns_label
            .as_ref()
            .map(|label| format!("{}.oraclevcn.com", label))
            .unwrap_or_else(|| "<no DNS label>".to_string());
        print!(
            "{}{}{}{}",
            "---------------------------------------- VCN = ".yellow(),
            vcn.display_name.red(),
            format!(" {}", vcn.cidr_block).blue(),
            format!(" {}", dns).yellow()
        );
        print_ocid(show_ocids, &vcn.id);

        for subnet in oci.list_subnets(&cpt_id, &vcn.id).await? {
            let dns = match (&subnet.dns_label, &vcn.dns_label) {
                (Some(subnet_label), Some(vcn_label)) => {
                    format!("{}.{}.oraclevcn.com", subnet_label, vcn_label)
                }
                _ => "<no DNS label>".to_string(),
            };
            print!(
                "    subnet = {}{}{}",
                subnet.display_name.green(),
                format!(" {}", subnet.cidr_block).blue(),
                format!(" {}", dns).yellow()
            );
            print_ocid(show_ocids, &subnet.id);

            let route_table = oci.get_route_table(&subnet.route_table_id).await?;
            print!("        route table   = {}", route_table.display_name.magenta());
            print_ocid(show_ocids, &route_table.id);
            for rule in &route_table.route_rules {
                println!(
                    "{}",
                    format!(
                        "            {:<18} --> {}",
                        rule.destination.as_deref().unwrap_or("-"),
                        rule.network_entity_id
                    )
                    .cyan()
                );
            }

            for security_list_id in &subnet.security_list_ids {
                let security_list = oci.get_security_list(security_list_id).await?;
                print!(
                    "        security list = {}",
                    security_list.display_name.magenta()
                );
                print_ocid(show_ocids, &security_list.id);

                println!("            ingress:");
                for rule in &security_list.ingress_security_rules {
                    println!(
                        "{}",
                        format!(
                            "                source       {:<18} {}",
                            rule.source.as_deref().unwrap_or("-"),
                            rule_details(rule)
                        )
                        .cyan()
                    );
                }
                println!("            egress:");
                for rule in &security_list.egress_security_rules {
                    println!(
                        "{}",
                        format!(
                            "                destination  {:<18} {}",
                            rule.destination.as_deref().unwrap_or("-"),
                            rule_details(rule)
                        )
                        .cyan()
                    );
                }
            }
        }

        for nsg in oci.list_network_security_groups(&cpt_id, &vcn.id).await? {
            print!(
                "    network security group = {}",
                nsg.display_name.magenta()
            );
            print_ocid(show_ocids, &nsg.id);

            let rules = oci.list_nsg_rules(&nsg.id).await?;
            println!("            ingress:");
            for rule in rules.iter().filter(|r| r.direction.as_deref() == Some("INGRESS")) {
                println!(
                    "{}",
                    format!(
                        "                source       {:<18} {}",
                        rule.source.as_deref().unwrap_or("-"),
                        rule_details(rule)
                    )
                    .cyan()
                );
            }
            println!("            egress:");
            for rule in rules.iter().filter(|r| r.direction.as_deref() == Some("EGRESS")) {
                println!(
                    "{}",
                    format!(
                        "                destination  {:<18} {}",
                        rule.destination.as_deref().unwrap_or("-"),
                        rule_details(rule)
                    )
                    .cyan()
                );
            }
        }
    }

    Ok(())
}

fn print_ocid(show_ocids: bool, id: &str) {
    if show_ocids {
        println!(" ({})", id);
    } else {
        println!();
    }
}

/// Render a security rule's protocol and port details.
pub(crate) fn rule_details(rule: &SecurityRule) -> String {
    match rule.protocol.as_str() {
        "all" => "ALL".to_string(),
        "1" => match &rule.icmp_options {
            Some(icmp) => match icmp.icmp_type {
                Some(icmp_type) => {
                    let code = icmp
                        .code
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "all".to_string());
                    format!("icmp type {} code {}", icmp_type, code)
                }
                None => "icmp all".to_string(),
            },
            None => "icmp all".to_string(),
        },
        "6" => port_details("tcp", rule.tcp_options.as_ref()),
        "17" => port_details("udp", rule.udp_options.as_ref()),
        other => other.to_string(),
    }
}

fn port_details(protocol: &str, options: Option<&ocikit_oci::PortOptions>) -> String {
    match options.and_then(|o| o.destination_port_range.as_ref()) {
        Some(range) if range.min == range.max => {
            format!("{}  port  {}", protocol, range.min)
        }
        Some(range) => format!("{}  ports {}-{}", protocol, range.min, range.max),
        None => format!("{}  ports all", protocol),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocikit_oci::{IcmpOptions, PortOptions, PortRange};

    fn tcp_rule(range: Option<PortRange>) -> SecurityRule {
        SecurityRule {
            protocol: "6".to_string(),
            tcp_options: Some(PortOptions {
                destination_port_range: range,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_protocol_all() {
        let rule = SecurityRule {
            protocol: "all".to_string(),
            ..Default::default()
        };
        assert_eq!(rule_details(&rule), "ALL");
    }

    #[test]
    fn test_tcp_single_port_and_range() {
        assert_eq!(
            rule_details(&tcp_rule(Some(PortRange { min: 22, max: 22 }))),
            "tcp  port  22"
        );
        assert_eq!(
            rule_details(&tcp_rule(Some(PortRange { min: 80, max: 443 }))),
            "tcp  ports 80-443"
        );
        assert_eq!(rule_details(&tcp_rule(None)), "tcp  ports all");
    }

    #[test]
    fn test_udp_without_options() {
        let rule = SecurityRule {
            protocol: "17".to_string(),
            ..Default::default()
        };
        assert_eq!(rule_details(&rule), "udp  ports all");
    }

    #[test]
    fn test_icmp_variants() {
        let typed = SecurityRule {
            protocol: "1".to_string(),
            icmp_options: Some(IcmpOptions {
                icmp_type: Some(3),
                code: Some(4),
            }),
            ..Default::default()
        };
        assert_eq!(rule_details(&typed), "icmp type 3 code 4");

        let no_code = SecurityRule {
            protocol: "1".to_string(),
            icmp_options: Some(IcmpOptions {
                icmp_type: Some(8),
                code: None,
            }),
            ..Default::default()
        };
        assert_eq!(rule_details(&no_code), "icmp type 8 code all");

        let bare = SecurityRule {
            protocol: "1".to_string(),
            ..Default::default()
        };
        assert_eq!(rule_details(&bare), "icmp all");
    }
}
