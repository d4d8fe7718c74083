use actix_files::Files;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use serde::Deserialize;
use std::sync::{Mutex, MutexGuard};

use crate::config::Config;
use crate::document;
use crate::error::MutationError;
use crate::lists::ListKind;
use crate::persistence::{DocumentStore, FileStore};
use crate::schedule::Slot;
use crate::state::Timetable;
use crate::views::{render_grid, render_list, render_slot_editor};

/// Shared server state: the one timetable and where it is persisted
pub struct AppState {
    pub timetable: Mutex<Timetable>,
    pub store: Box<dyn DocumentStore>,
    pub autosave: bool,
}

impl AppState {
    /// Restores the timetable from `store`. Anything unreadable or invalid starts empty.
    pub fn load(store: Box<dyn DocumentStore>, autosave: bool) -> Self {
        let timetable = Self::read(&*store);

        Self {
            timetable: Mutex::new(timetable),
            store,
            autosave,
        }
    }

    fn read(store: &dyn DocumentStore) -> Timetable {
        let timetable = match store.load() {
            Ok(Some(json)) => document::load_or_empty(&json),
            Ok(None) => {
                log::info!("no saved timetable, starting empty");
                Timetable::new()
            }
            Err(e) => {
                log::error!("failed to read saved timetable: {}", e);
                Timetable::new()
            }
        };
        log::info!(
            "timetable ready: {} room(s), {} booked slot(s)",
            timetable.list(ListKind::Rooms).len(),
            timetable.store().booked_count()
        );
        timetable
    }

    fn lock(&self) -> Result<MutexGuard<'_, Timetable>> {
        self.timetable
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("timetable lock poisoned"))
    }

    fn save(&self, timetable: &Timetable) -> Result<(), String> {
        let json = document::to_json(timetable).map_err(|e| e.to_string())?;
        self.store.save(&json).map_err(|e| e.to_string())
    }

    /// Saves after a successful edit when autosave is on. Failures are reported, not fatal.
    fn autosave(&self, timetable: &Timetable) -> serde_json::Value {
        if !self.autosave {
            return serde_json::json!({"success": true});
        }
        match self.save(timetable) {
            Ok(()) => serde_json::json!({"success": true, "saved": true}),
            Err(e) => {
                log::error!("autosave failed: {}", e);
                serde_json::json!({
                    "success": true,
                    "saved": false,
                    "warning": format!("Failed to save: {}", e)
                })
            }
        }
    }
}

#[derive(Deserialize)]
pub struct RoomRequest {
    room: String,
}

#[derive(Deserialize)]
pub struct ValueRequest {
    value: String,
}

#[derive(Deserialize)]
pub struct SlotRequest {
    group: String,
    lecture: String,
    teacher: String,
}

fn bad_request(error: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest()
        .json(serde_json::json!({"success": false, "error": error.to_string()}))
}

fn parse_kind(kind: &str) -> std::result::Result<ListKind, HttpResponse> {
    kind.parse::<ListKind>().map_err(bad_request)
}

fn cell(time: i64, day: i64) -> std::result::Result<(usize, usize), MutationError> {
    match (usize::try_from(time), usize::try_from(day)) {
        (Ok(time), Ok(day)) => Ok((time, day)),
        _ => Err(MutationError::OutOfRange { time, day }),
    }
}

// Grid of the selected room
async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let timetable = state.lock()?;
    Ok(HttpResponse::Ok().json(render_grid(&timetable, None)))
}

async fn get_room_schedule(
    room: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let timetable = state.lock()?;
    if !timetable.list(ListKind::Rooms).contains(&room) {
        return Ok(HttpResponse::NotFound()
            .json(serde_json::json!({"success": false, "error": "Unknown room"})));
    }
    Ok(HttpResponse::Ok().json(render_grid(&timetable, Some(room.as_str()))))
}

async fn select_room(
    req: web::Json<RoomRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut timetable = state.lock()?;
    match timetable.select_room(&req.room) {
        Ok(()) => Ok(HttpResponse::Ok().json(render_grid(&timetable, None))),
        Err(e) => Ok(bad_request(e)),
    }
}

async fn get_list(kind: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return Ok(resp),
    };
    let timetable = state.lock()?;
    Ok(HttpResponse::Ok().json(render_list(&timetable, kind)))
}

async fn add_to_list(
    kind: web::Path<String>,
    req: web::Json<ValueRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return Ok(resp),
    };
    let mut timetable = state.lock()?;
    let added = timetable.add(kind, &req.value);
    let mut body = state.autosave(&timetable);
    body["added"] = added.into();
    body["list"] = serde_json::to_value(render_list(&timetable, kind))?;
    Ok(HttpResponse::Ok().json(body))
}

async fn remove_from_list(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (kind, value) = path.into_inner();
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(resp) => return Ok(resp),
    };
    let mut timetable = state.lock()?;
    let removed = timetable.remove(kind, &value);
    let mut body = if removed {
        state.autosave(&timetable)
    } else {
        serde_json::json!({"success": true})
    };
    body["removed"] = removed.into();
    body["list"] = serde_json::to_value(render_list(&timetable, kind))?;
    Ok(HttpResponse::Ok().json(body))
}

async fn get_slot(
    path: web::Path<(String, i64, i64)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (room, time, day) = path.into_inner();
    let (time, day) = match cell(time, day) {
        Ok(cell) => cell,
        Err(e) => return Ok(bad_request(e)),
    };
    let timetable = state.lock()?;
    match render_slot_editor(&timetable, &room, time, day) {
        Some(editor) => Ok(HttpResponse::Ok().json(editor)),
        None => Ok(HttpResponse::NotFound()
            .json(serde_json::json!({"success": false, "error": "Slot not available"}))),
    }
}

async fn put_slot(
    path: web::Path<(String, i64, i64)>,
    req: web::Json<SlotRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (room, time, day) = path.into_inner();
    let (time, day) = match cell(time, day) {
        Ok(cell) => cell,
        Err(e) => return Ok(bad_request(e)),
    };
    let req = req.into_inner();
    let slot = Slot::new(req.group, req.lecture, req.teacher);

    let mut timetable = state.lock()?;
    match timetable.set_slot(&room, time, day, slot) {
        Ok(()) => Ok(HttpResponse::Ok().json(state.autosave(&timetable))),
        Err(e) => {
            log::warn!("rejected booking for {} ({}, {}): {}", room, time, day, e);
            Ok(bad_request(e))
        }
    }
}

async fn delete_slot(
    path: web::Path<(String, i64, i64)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (room, time, day) = path.into_inner();
    let (time, day) = match cell(time, day) {
        Ok(cell) => cell,
        Err(e) => return Ok(bad_request(e)),
    };
    let mut timetable = state.lock()?;
    match timetable.clear_slot(&room, time, day) {
        Ok(()) => Ok(HttpResponse::Ok().json(state.autosave(&timetable))),
        Err(e) => Ok(bad_request(e)),
    }
}

// Whole document, as persisted
async fn get_data(state: web::Data<AppState>) -> Result<HttpResponse> {
    let timetable = state.lock()?;
    Ok(HttpResponse::Ok().json(timetable.to_document()))
}

// Replaces the timetable with an uploaded document. An invalid document
// leaves an empty timetable behind; the saved copy is not touched then.
async fn post_data(body: web::Bytes, state: web::Data<AppState>) -> Result<HttpResponse> {
    let parsed = std::str::from_utf8(&body)
        .map_err(|e| e.to_string())
        .and_then(|json| document::parse(json).map_err(|e| e.to_string()));

    let mut timetable = state.lock()?;
    match parsed {
        Ok(loaded) => {
            *timetable = loaded;
            log::info!("timetable replaced from uploaded document");
            Ok(HttpResponse::Ok().json(state.autosave(&timetable)))
        }
        Err(e) => {
            log::warn!("uploaded document rejected, timetable reset: {}", e);
            *timetable = Timetable::new();
            Ok(bad_request(format!("Invalid document: {}", e)))
        }
    }
}

async fn save_data(state: web::Data<AppState>) -> Result<HttpResponse> {
    let timetable = state.lock()?;
    match state.save(&timetable) {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({"success": true}))),
        Err(e) => Ok(HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": format!("Failed to save: {}", e)
        }))),
    }
}

// Drops unsaved edits and re-reads the persisted document
async fn load_data(state: web::Data<AppState>) -> Result<HttpResponse> {
    let loaded = AppState::read(&*state.store);
    let mut timetable = state.lock()?;
    *timetable = loaded;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "schedule": render_grid(&timetable, None)
    })))
}

/// Registers the API routes. Shared by the server and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/schedule", web::get().to(get_schedule))
        .route("/api/schedule/{room}", web::get().to(get_room_schedule))
        .route("/api/room", web::post().to(select_room))
        .route("/api/lists/{kind}", web::get().to(get_list))
        .route("/api/lists/{kind}", web::post().to(add_to_list))
        .route("/api/lists/{kind}/{value}", web::delete().to(remove_from_list))
        .service(
            web::resource("/api/slot/{room}/{time}/{day}")
                .route(web::get().to(get_slot))
                .route(web::put().to(put_slot))
                .route(web::delete().to(delete_slot)),
        )
        .route("/api/data", web::get().to(get_data))
        .route("/api/data", web::post().to(post_data))
        .route("/api/save", web::post().to(save_data))
        .route("/api/load", web::post().to(load_data));
}

pub async fn start_server(config: Config) -> std::io::Result<()> {
    let store = Box::new(FileStore::new(&config.data_path));
    let app_state = web::Data::new(AppState::load(store, config.autosave));
    let static_dir = config.static_dir.clone();
    let serve_static = static_dir.is_dir();
    if !serve_static {
        log::info!("static directory {} not found, serving API only", static_dir.display());
    }

    HttpServer::new(move || {
        let app = App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure);
        if serve_static {
            app.service(Files::new("/static", &static_dir).index_file("index.html"))
        } else {
            app
        }
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
