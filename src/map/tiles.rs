//! Kachel-Layer: asynchroner Abruf, Dekodierung, Textur-Cache.
//!
//! Jeder Layer (Basiskarte, Traffic-Flow, Radar) haelt seinen eigenen
//! Cache. Fehlende Kacheln werden beim ersten Zugriff auf einem
//! Worker-Thread geladen; dekodierte Bilder kommen ueber einen Channel
//! zurueck und werden im UI-Thread als Texturen hochgeladen.

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Kachel-Koordinate im Slippy-Map-Schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

enum TileState {
    /// Abruf laeuft auf einem Worker-Thread
    Pending,
    Ready(egui::TextureHandle),
    /// Abruf fehlgeschlagen; wird nicht erneut versucht
    Failed,
}

/// Obergrenze des Caches; darueber werden zoom-ferne Kacheln verworfen.
const CACHE_CAPACITY: usize = 512;

/// Ein Raster-Kachel-Layer mit URL-Template (`{z}`, `{x}`, `{y}`, `{s}`).
pub struct TileLayer {
    url_template: String,
    /// Deckkraft beim Zeichnen (Overlays < 1.0)
    pub opacity: f32,
    tiles: HashMap<TileCoord, TileState>,
    tx: Sender<(TileCoord, Option<egui::ColorImage>)>,
    rx: Receiver<(TileCoord, Option<egui::ColorImage>)>,
    client: reqwest::blocking::Client,
    ctx: egui::Context,
}

impl TileLayer {
    pub fn new(
        url_template: String,
        opacity: f32,
        client: reqwest::blocking::Client,
        ctx: egui::Context,
    ) -> Self {
        let (tx, rx) = channel();
        Self {
            url_template,
            opacity,
            tiles: HashMap::new(),
            tx,
            rx,
            client,
            ctx,
        }
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Uebernimmt angekommene Kacheln als Texturen. Einmal pro Frame rufen.
    pub fn poll(&mut self) {
        while let Ok((coord, image)) = self.rx.try_recv() {
            let state = match image {
                Some(image) => {
                    let name = format!("tile-{}-{}-{}", coord.z, coord.x, coord.y);
                    TileState::Ready(self.ctx.load_texture(
                        name,
                        image,
                        egui::TextureOptions::LINEAR,
                    ))
                }
                None => TileState::Failed,
            };
            self.tiles.insert(coord, state);
        }
    }

    /// Liefert die Textur einer Kachel; stoesst bei Bedarf den Abruf an.
    pub fn texture_for(&mut self, coord: TileCoord) -> Option<egui::TextureId> {
        match self.tiles.get(&coord) {
            Some(TileState::Ready(handle)) => return Some(handle.id()),
            Some(_) => return None,
            None => {}
        }
        self.evict_if_full(coord.z);
        self.tiles.insert(coord, TileState::Pending);
        self.spawn_fetch(coord);
        None
    }

    /// Gibt `true` zurueck, solange Abrufe ausstehen (Repaint noetig).
    pub fn has_pending(&self) -> bool {
        self.tiles
            .values()
            .any(|state| matches!(state, TileState::Pending))
    }

    fn spawn_fetch(&self, coord: TileCoord) {
        let url = resolve_template(&self.url_template, coord);
        let client = self.client.clone();
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        std::thread::spawn(move || {
            let image = fetch_tile(&client, &url);
            if image.is_none() {
                log::warn!("Kachel-Abruf fehlgeschlagen: {url}");
            }
            let _ = tx.send((coord, image));
            ctx.request_repaint();
        });
    }

    fn evict_if_full(&mut self, current_zoom: u8) {
        if self.tiles.len() < CACHE_CAPACITY {
            return;
        }
        self.tiles.retain(|coord, state| {
            matches!(state, TileState::Pending)
                || coord.z.abs_diff(current_zoom) <= 1
        });
    }
}

/// Ersetzt `{z}`/`{x}`/`{y}` und verteilt `{s}` auf die OSM-Subdomains.
fn resolve_template(template: &str, coord: TileCoord) -> String {
    const SUBDOMAINS: [&str; 3] = ["a", "b", "c"];
    let sub = SUBDOMAINS[((coord.x + coord.y) % 3) as usize];
    template
        .replace("{s}", sub)
        .replace("{z}", &coord.z.to_string())
        .replace("{x}", &coord.x.to_string())
        .replace("{y}", &coord.y.to_string())
}

fn fetch_tile(client: &reqwest::blocking::Client, url: &str) -> Option<egui::ColorImage> {
    let response = client.get(url).send().ok()?;
    if !response.status().is_success() {
        return None;
    }
    let bytes = response.bytes().ok()?;
    let decoded = image::load_from_memory(&bytes).ok()?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Some(egui::ColorImage::from_rgba_unmultiplied(
        size,
        rgba.as_raw(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_substitutes_all_placeholders() {
        let coord = TileCoord { z: 13, x: 1293, y: 2788 };
        let url = resolve_template(
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            coord,
        );
        assert_eq!(url, "https://b.tile.openstreetmap.org/13/1293/2788.png");
    }

    #[test]
    fn subdomain_is_stable_per_coordinate() {
        let coord = TileCoord { z: 5, x: 10, y: 11 };
        let a = resolve_template("{s}/{z}/{x}/{y}", coord);
        let b = resolve_template("{s}/{z}/{x}/{y}", coord);
        assert_eq!(a, b);
    }

    #[test]
    fn template_without_subdomain_stays_unchanged() {
        let coord = TileCoord { z: 1, x: 2, y: 3 };
        let url = resolve_template("https://tiles.example.com/{z}/{x}/{y}.png?key=k", coord);
        assert_eq!(url, "https://tiles.example.com/1/2/3.png?key=k");
    }
}
