//! Catalog assembly and XML serialization.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use feed_model::{CURRENCY_ID, Catalog, CategoryBinding, Currency, Offer};

/// Compose the document tree in output order. Offers and categories keep the
/// order they arrive in.
pub fn assemble(
    offers: Vec<Offer>,
    categories: Vec<CategoryBinding>,
    timestamp: impl Into<String>,
) -> Catalog {
    Catalog {
        date: timestamp.into(),
        currency: Currency::default(),
        categories,
        offers,
    }
}

/// Serialize a catalog to the complete UTF-8 document text.
///
/// Output is compact: no indentation, no whitespace between tags, so the
/// document is byte-deterministic for a given catalog and timestamp.
/// Sanitized fields are written without re-escaping their ampersands;
/// attribute values go through the writer's own escaping.
pub fn write_feed(catalog: &Catalog) -> Result<String> {
    let mut xml = Writer::new(Cursor::new(Vec::new()));

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("yml_catalog");
    root.push_attribute(("date", catalog.date.as_str()));
    xml.write_event(Event::Start(root))?;
    xml.write_event(Event::Start(BytesStart::new("shop")))?;

    xml.write_event(Event::Start(BytesStart::new("currencies")))?;
    let mut currency = BytesStart::new("currency");
    currency.push_attribute(("id", catalog.currency.id.as_str()));
    currency.push_attribute(("rate", catalog.currency.rate.as_str()));
    xml.write_event(Event::Empty(currency))?;
    xml.write_event(Event::End(BytesEnd::new("currencies")))?;

    xml.write_event(Event::Start(BytesStart::new("categories")))?;
    for binding in &catalog.categories {
        write_category(&mut xml, binding)?;
    }
    xml.write_event(Event::End(BytesEnd::new("categories")))?;

    xml.write_event(Event::Start(BytesStart::new("offers")))?;
    for offer in &catalog.offers {
        write_offer(&mut xml, offer)?;
    }
    xml.write_event(Event::End(BytesEnd::new("offers")))?;

    xml.write_event(Event::End(BytesEnd::new("shop")))?;
    xml.write_event(Event::End(BytesEnd::new("yml_catalog")))?;

    let bytes = xml.into_inner().into_inner();
    String::from_utf8(bytes).context("serialized feed is not utf-8")
}

fn write_category<W: Write>(xml: &mut Writer<W>, binding: &CategoryBinding) -> Result<()> {
    let mut category = BytesStart::new("category");
    category.push_attribute(("id", binding.id.as_str()));
    category.push_attribute(("rz_id", binding.id.as_str()));
    xml.write_event(Event::Start(category))?;
    xml.write_event(Event::Text(sanitized_text(&binding.name)))?;
    xml.write_event(Event::End(BytesEnd::new("category")))?;
    Ok(())
}

fn write_offer<W: Write>(xml: &mut Writer<W>, offer: &Offer) -> Result<()> {
    let mut element = BytesStart::new("offer");
    element.push_attribute(("id", offer.id.as_str()));
    element.push_attribute(("available", if offer.available { "true" } else { "false" }));
    xml.write_event(Event::Start(element))?;

    write_sanitized_element(xml, "name", &offer.name)?;
    write_sanitized_element(xml, "name_ua", &offer.name_ua)?;
    write_sanitized_element(xml, "price", &offer.price)?;
    write_text_element(xml, "currencyId", CURRENCY_ID)?;
    write_sanitized_element(xml, "categoryId", &offer.category_id)?;
    for picture in &offer.pictures {
        write_sanitized_element(xml, "picture", picture)?;
    }
    if let Some(vendor) = &offer.vendor {
        write_sanitized_element(xml, "vendor", vendor)?;
    }
    write_text_element(xml, "stock_quantity", &offer.stock_quantity.to_string())?;
    write_cdata_element(xml, "description", &offer.description)?;
    write_cdata_element(xml, "description_ua", &offer.description_ua)?;
    for param in &offer.params {
        let mut element = BytesStart::new("param");
        element.push_attribute(("name", param.name.as_str()));
        xml.write_event(Event::Start(element))?;
        xml.write_event(Event::Text(BytesText::new(&param.value)))?;
        xml.write_event(Event::End(BytesEnd::new("param")))?;
    }

    xml.write_event(Event::End(BytesEnd::new("offer")))?;
    Ok(())
}

/// Write an element whose text went through the writer's own escaping.
fn write_text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write an element carrying already-sanitized text.
fn write_sanitized_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(sanitized_text(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write an element whose CDATA payload already carries its section splits.
fn write_cdata_element<W: Write>(xml: &mut Writer<W>, name: &str, payload: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::CData(BytesCData::new(payload)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Text event for sanitized content: ampersands are already entity-safe, so
/// only angle brackets are left to escape. Running the writer's full
/// escaping here would double-escape `&amp;` into `&amp;amp;`.
fn sanitized_text(value: &str) -> BytesText<'static> {
    let escaped = value.replace('<', "&lt;").replace('>', "&gt;");
    BytesText::from_escaped(escaped)
}

#[cfg(test)]
mod tests {
    use feed_model::{CategoryBinding, Offer, Param};

    use super::{assemble, write_feed};

    fn base_offer() -> Offer {
        Offer {
            id: "1".to_string(),
            available: true,
            stock_quantity: 30,
            name: "Item".to_string(),
            name_ua: "Річ".to_string(),
            price: "100".to_string(),
            category_id: "5".to_string(),
            pictures: vec![],
            vendor: None,
            description: String::new(),
            description_ua: String::new(),
            params: vec![],
        }
    }

    #[test]
    fn document_skeleton_is_complete_and_ordered() {
        let catalog = assemble(vec![], vec![], "2024-05-01T00:00:00.000Z");
        let xml = write_feed(&catalog).expect("serialize");
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <yml_catalog date=\"2024-05-01T00:00:00.000Z\"><shop>\
             <currencies><currency id=\"UAH\" rate=\"1\"/></currencies>\
             <categories></categories>\
             <offers></offers>\
             </shop></yml_catalog>"
        );
    }

    #[test]
    fn sanitized_fields_are_not_double_escaped() {
        let mut offer = base_offer();
        offer.name = "Tom &amp; Jerry".to_string();
        let catalog = assemble(vec![offer], vec![], "t");
        let xml = write_feed(&catalog).expect("serialize");
        assert!(xml.contains("<name>Tom &amp; Jerry</name>"));
        assert!(!xml.contains("&amp;amp;"));
    }

    #[test]
    fn angle_brackets_in_sanitized_text_are_escaped() {
        let mut offer = base_offer();
        offer.name = "5 < 6".to_string();
        let catalog = assemble(vec![offer], vec![], "t");
        let xml = write_feed(&catalog).expect("serialize");
        assert!(xml.contains("<name>5 &lt; 6</name>"));
    }

    #[test]
    fn empty_fields_still_emit_elements() {
        let mut offer = base_offer();
        offer.name = String::new();
        offer.price = String::new();
        let catalog = assemble(vec![offer], vec![], "t");
        let xml = write_feed(&catalog).expect("serialize");
        assert!(xml.contains("<name></name>"));
        assert!(xml.contains("<price></price>"));
        assert!(xml.contains("<description><![CDATA[]]></description>"));
    }

    #[test]
    fn vendor_and_pictures_are_omitted_when_absent() {
        let catalog = assemble(vec![base_offer()], vec![], "t");
        let xml = write_feed(&catalog).expect("serialize");
        assert!(!xml.contains("<vendor>"));
        assert!(!xml.contains("<picture>"));
    }

    #[test]
    fn attribute_values_use_writer_escaping() {
        let mut offer = base_offer();
        offer.id = "A&B".to_string();
        offer.params = vec![Param {
            name: "Size \"EU\"".to_string(),
            value: "38 & up".to_string(),
        }];
        let catalog = assemble(vec![offer], vec![], "t");
        let xml = write_feed(&catalog).expect("serialize");
        assert!(xml.contains("<offer id=\"A&amp;B\" available=\"true\">"));
        assert!(xml.contains("<param name=\"Size &quot;EU&quot;\">38 &amp; up</param>"));
    }

    #[test]
    fn category_carries_id_twice_and_sanitized_name() {
        let categories = vec![CategoryBinding {
            id: "12".to_string(),
            name: "Chairs &amp; Tables".to_string(),
        }];
        let catalog = assemble(vec![], categories, "t");
        let xml = write_feed(&catalog).expect("serialize");
        assert!(
            xml.contains("<category id=\"12\" rz_id=\"12\">Chairs &amp; Tables</category>")
        );
    }

    #[test]
    fn offer_order_is_preserved() {
        let mut first = base_offer();
        first.id = "a".to_string();
        let mut second = base_offer();
        second.id = "b".to_string();
        let catalog = assemble(vec![first, second], vec![], "t");
        let xml = write_feed(&catalog).expect("serialize");
        let a = xml.find("<offer id=\"a\"").expect("first offer");
        let b = xml.find("<offer id=\"b\"").expect("second offer");
        assert!(a < b);
    }
}
