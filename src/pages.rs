//! Server-rendered HTML pages.

use htmlize::{escape_attribute, escape_text};

use crate::features::FEATURES;

const STYLE: &str = "body{background:#0f0f0f;color:#bfb6a8;font-family:sans-serif;margin:2rem}\
h1{color:#c9a34b}label{display:block;margin:.4rem 0}\
input,select{background:#1e1e1e;color:#fff;border:1px solid #c9a34b;padding:.3rem}\
.msg{color:#c9a34b;font-weight:bold}a{color:#c9a34b}";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{}</title>\
         <style>{}</style></head><body>{}</body></html>\n",
        escape_text(title),
        STYLE,
        body
    )
}

fn field_input(name: &str) -> String {
    let control = match name {
        "furnishingstatus" => "<select name=\"furnishingstatus\">\
             <option value=\"furnished\">furnished</option>\
             <option value=\"semi-furnished\">semi-furnished</option>\
             <option value=\"unfurnished\">unfurnished</option></select>"
            .to_string(),
        "mainroad" | "guestroom" | "basement" | "hotwaterheating" | "airconditioning"
        | "prefarea" => format!(
            "<select name=\"{name}\"><option value=\"1\">yes</option>\
             <option value=\"0\">no</option></select>"
        ),
        _ => format!("<input name=\"{name}\" inputmode=\"decimal\" required>"),
    };
    format!("<label>{name} {control}</label>")
}

/// The prediction form, with an optional inline message above it.
pub fn index(message: Option<&str>) -> String {
    let msg = message
        .map(|m| format!("<p class=\"msg\">{}</p>", escape_text(m)))
        .unwrap_or_default();
    let fields: String = FEATURES.iter().map(|f| field_input(f)).collect();
    page(
        "House price estimator",
        &format!(
            "<h1>House price estimator</h1>{msg}\
             <form method=\"post\" action=\"/predict\">{fields}\
             <button type=\"submit\">Estimate</button></form>\
             <p><a href=\"/blueprint\">Blueprint preview</a></p>"
        ),
    )
}

pub fn estimate(prediction: &str, total_area: Option<f64>) -> String {
    let split = total_area
        .map(|a| {
            format!(
                "<p>Total area: {a:?} sq.ft &middot; <a href=\"/split?area={}\">Split into rooms</a></p>",
                escape_attribute(format!("{a:?}"))
            )
        })
        .unwrap_or_default();
    page(
        "Estimate",
        &format!(
            "<h1>Estimated price</h1><p class=\"msg\">{}</p>{split}<p><a href=\"/\">Back</a></p>",
            escape_text(prediction)
        ),
    )
}

/// Room split page; the script posts the rooms to `/generate_blueprint`.
pub fn split(total_area: f64) -> String {
    page(
        "Split area",
        &format!(
            "<h1>Split {total_area:?} sq.ft</h1>\
             <div id=\"rooms\"></div>\
             <button onclick=\"addRoom()\">Add room</button> \
             <button onclick=\"generate()\">Download blueprint</button>\
             <p class=\"msg\" id=\"err\"></p>\
             <script>const TOTAL_AREA={total_area:?};{SPLIT_SCRIPT}</script>"
        ),
    )
}

const SPLIT_SCRIPT: &str = r#"
function addRoom(name, area){const d=document.createElement('div');
d.innerHTML='<input class="n" placeholder="room"> <input class="a" placeholder="sq.ft">';
d.querySelector('.n').value=name||'';d.querySelector('.a').value=area||'';
document.getElementById('rooms').appendChild(d);}
addRoom('Living Room',Math.round(TOTAL_AREA*0.4));addRoom('Bedroom',Math.round(TOTAL_AREA*0.3));
addRoom('Kitchen',Math.round(TOTAL_AREA*0.2));addRoom('Bath',Math.round(TOTAL_AREA*0.1));
async function generate(){const rooms=[...document.querySelectorAll('#rooms div')].map(d=>({
room:d.querySelector('.n').value,area:parseFloat(d.querySelector('.a').value)}));
const r=await fetch('/generate_blueprint',{method:'POST',headers:{'Content-Type':'application/json'},
body:JSON.stringify({rooms})});
if(!r.ok){document.getElementById('err').textContent=(await r.json()).error;return;}
const a=document.createElement('a');a.href=URL.createObjectURL(await r.blob());
a.download='blueprint.png';a.click();}
"#;

pub fn blueprint_preview() -> String {
    page(
        "Blueprint preview",
        "<h1>Blueprint preview</h1>\
         <p>Rooms are packed largest first, left to right, wrapping into new rows.</p>\
         <svg width=\"750\" height=\"500\" viewBox=\"0 0 1500 1000\" style=\"background:#0f0f0f\">\
         <rect x=\"16\" y=\"16\" width=\"700\" height=\"420\" fill=\"#1e1e1e\" stroke=\"#c9a34b\" stroke-width=\"3\"/>\
         <rect x=\"732\" y=\"16\" width=\"420\" height=\"330\" fill=\"#1e1e1e\" stroke=\"#c9a34b\" stroke-width=\"3\"/>\
         <rect x=\"1168\" y=\"16\" width=\"300\" height=\"280\" fill=\"#1e1e1e\" stroke=\"#c9a34b\" stroke-width=\"3\"/>\
         <text x=\"16\" y=\"966\" fill=\"#bfb6a8\" font-size=\"32\">Total: 1000 sq.ft</text></svg>\
         <p><a href=\"/split\">Split an area into rooms</a></p>",
    )
}
