//! Interface discovery from a domain's XML description.

use roxmltree::{Document, Node};

/// Parse a domain XML description.
pub fn parse_description(xml: &str) -> Result<Document<'_>, roxmltree::Error> {
    Document::parse(xml)
}

/// Target device names of every `<domain><devices><interface><target dev=..>`.
///
/// Document order is kept and duplicates are not removed. The `<domain>`
/// element may sit anywhere in the document, so libvirt status files (which
/// wrap it in `<domstatus>`) work as well as plain `virsh dumpxml` output.
/// Interfaces without a target device, such as a freshly defined domain that
/// has not been started, contribute nothing.
pub fn list_interfaces(doc: &Document<'_>) -> Vec<String> {
    doc.descendants()
        .filter(|node| node.has_tag_name("target") && is_interface_target(node))
        .filter_map(|node| node.attribute("dev"))
        .map(str::to_string)
        .collect()
}

fn is_interface_target(target: &Node<'_, '_>) -> bool {
    let interface = match target.parent_element() {
        Some(n) if n.has_tag_name("interface") => n,
        _ => return false,
    };
    let devices = match interface.parent_element() {
        Some(n) if n.has_tag_name("devices") => n,
        _ => return false,
    };
    matches!(devices.parent_element(), Some(n) if n.has_tag_name("domain"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interfaces(xml: &str) -> Vec<String> {
        let doc = parse_description(xml).unwrap();
        list_interfaces(&doc)
    }

    const TWO_NICS: &str = r#"
<domain type='kvm' id='3'>
  <name>vm1</name>
  <devices>
    <disk type='file' device='disk'>
      <target dev='vda' bus='virtio'/>
    </disk>
    <interface type='network'>
      <mac address='52:54:00:6b:3c:58'/>
      <source network='default' bridge='virbr0'/>
      <target dev='vnet0'/>
      <model type='virtio'/>
    </interface>
    <interface type='bridge'>
      <source bridge='br0'/>
      <target dev='vnet1' managed='no'/>
    </interface>
  </devices>
</domain>"#;

    #[test]
    fn test_lists_interface_targets_in_order() {
        assert_eq!(interfaces(TWO_NICS), vec!["vnet0", "vnet1"]);
    }

    #[test]
    fn test_disk_targets_are_not_interfaces() {
        assert!(!interfaces(TWO_NICS).contains(&"vda".to_string()));
    }

    #[test]
    fn test_no_interfaces_is_empty() {
        let xml = "<domain><name>vm1</name><devices><disk><target dev='vda'/></disk></devices></domain>";
        assert!(interfaces(xml).is_empty());
        assert!(interfaces("<domain><name>vm1</name></domain>").is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let xml = "<domain><devices>\
            <interface><target dev='vnet0'/></interface>\
            <interface><target dev='vnet0'/></interface>\
            </devices></domain>";
        assert_eq!(interfaces(xml), vec!["vnet0", "vnet0"]);
    }

    #[test]
    fn test_interface_without_target_is_skipped() {
        let xml = "<domain><devices>\
            <interface type='network'><source network='default'/></interface>\
            <interface><target dev='tap3'/></interface>\
            </devices></domain>";
        assert_eq!(interfaces(xml), vec!["tap3"]);
    }

    #[test]
    fn test_status_file_wrapper() {
        let xml = "<domstatus state='running' pid='4242'>\
            <monitor path='/var/lib/libvirt/qemu/domain-3-vm1/monitor.sock'/>\
            <domain type='kvm'><name>vm1</name><devices>\
            <interface type='network'><target dev='vnet7'/></interface>\
            </devices></domain></domstatus>";
        assert_eq!(interfaces(xml), vec!["vnet7"]);
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(parse_description("<domain><devices>").is_err());
    }
}
