// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Regdash-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Regdash and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};
use tokio::sync::Mutex;
use tracing::info;

use crate::model::{
    timestamp_labels, Axis, Method, Organ, Payload, PatientId, PickX, Roster, Selection,
    SelectionPatch, ViewEvent, ViewId, TIMESTAMP_COUNT,
};
use crate::render::Figure;
use crate::sync::{ControlChange, Dashboard, DisplayControls, Refresh, Trigger};

use super::types::*;

#[derive(Clone)]
pub struct RegdashMcp {
    dashboard: Arc<Mutex<Dashboard>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RegdashMcp {
    pub fn new(dashboard: Dashboard) -> Self {
        Self::new_shared(Arc::new(Mutex::new(dashboard)))
    }

    pub fn new_shared(dashboard: Arc<Mutex<Dashboard>>) -> Self {
        Self { dashboard, tool_router: Self::tool_router() }
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        info!("serving MCP over stdio");
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// List the roster, the timestamp labels and the view ids; start here before
    /// `view.click` or `selection.update`.
    #[tool(name = "roster.read")]
    async fn roster_read(&self) -> Result<Json<RosterReadResponse>, ErrorData> {
        let dashboard = self.dashboard.lock().await;
        let patients = patient_labels(dashboard.dataset().roster());
        let meshes = dashboard.mesh_store().is_some();
        drop(dashboard);

        Ok(Json(RosterReadResponse {
            patients,
            timestamps: timestamp_labels(),
            views: ViewId::ALL.iter().map(|view| view.as_str().to_owned()).collect(),
            meshes,
        }))
    }

    /// Read the current (patient, timestamp, organ) selection and the display controls.
    #[tool(name = "selection.read")]
    async fn selection_read(&self) -> Result<Json<SelectionReadResponse>, ErrorData> {
        let dashboard = self.dashboard.lock().await;
        Ok(Json(SelectionReadResponse {
            selection: mcp_selection(dashboard.selection()),
            controls: mcp_controls(dashboard.controls()),
        }))
    }

    /// Set the selection directly; every view re-renders with baseline highlights.
    #[tool(name = "selection.update")]
    async fn selection_update(
        &self,
        params: Parameters<SelectionUpdateParams>,
    ) -> Result<Json<RefreshResponse>, ErrorData> {
        let SelectionUpdateParams { patient, timestamp, organ, figures } = params.0;
        let timestamp = timestamp.map(parse_timestamp).transpose()?;
        let organ = organ.map(|label| parse_organ(&label)).transpose()?;
        self.with_dashboard(move |dashboard| -> Result<Json<RefreshResponse>, ErrorData> {
            let patient = patient
                .map(|label| parse_patient(dashboard.dataset().roster(), &label))
                .transpose()?;
            let patch = SelectionPatch { patient, timestamp, organ };
            let refresh = dashboard.handle(Trigger::Select(patch));
            Ok(Json(refresh_response(refresh, dashboard.controls(), figures.unwrap_or(false))))
        })
        .await?
    }

    /// Deliver a raw click on a peer view; the click is resolved, the selection and dependent
    /// controls update, and every view re-renders with the resolved highlight.
    #[tool(name = "view.click")]
    async fn view_click(
        &self,
        params: Parameters<ViewClickParams>,
    ) -> Result<Json<RefreshResponse>, ErrorData> {
        let ViewClickParams { view, event, figures } = params.0;
        let view = parse_view(&view)?;
        if !view.is_peer() {
            return Err(ErrorData::invalid_params(
                format!("view '{view}' does not originate selections"),
                Some(serde_json::json!({ "peers": peer_labels() })),
            ));
        }
        self.with_dashboard(move |dashboard| {
            let refresh = dashboard.handle(Trigger::Pick { view, event });
            Json(refresh_response(refresh, dashboard.controls(), figures.unwrap_or(false)))
        })
        .await
    }

    /// Change one display control; only the views that depend on it re-render.
    #[tool(name = "control.set")]
    async fn control_set(
        &self,
        params: Parameters<ControlSetParams>,
    ) -> Result<Json<RefreshResponse>, ErrorData> {
        let ControlSetParams { control, value, figures } = params.0;
        let change = parse_control(&control, &value)?;
        self.with_dashboard(move |dashboard| {
            let refresh = dashboard.handle(Trigger::Control(change));
            Json(refresh_response(refresh, dashboard.controls(), figures.unwrap_or(false)))
        })
        .await
    }

    /// Render one view as a Plotly figure from the current state.
    #[tool(name = "view.render")]
    async fn view_render(
        &self,
        params: Parameters<ViewRenderParams>,
    ) -> Result<Json<ViewRenderResponse>, ErrorData> {
        let view = parse_view(&params.0.view)?;
        let figure = self.with_dashboard(move |dashboard| dashboard.render_view(view)).await?;
        Ok(Json(ViewRenderResponse { view: view.as_str().to_owned(), figure: figure.to_json() }))
    }

    /// Render every view; expensive when meshes are configured.
    #[tool(name = "dashboard.render")]
    async fn dashboard_render(&self) -> Result<Json<DashboardRenderResponse>, ErrorData> {
        let (figures, selection) = self
            .with_dashboard(|dashboard| (dashboard.render_all(), mcp_selection(dashboard.selection())))
            .await?;
        Ok(Json(DashboardRenderResponse {
            selection,
            figures: figures
                .iter()
                .map(|(view, figure)| (view.as_str().to_owned(), figure.to_json()))
                .collect(),
        }))
    }
}

impl RegdashMcp {
    /// Runs `work` with the dashboard locked on the blocking pool, so mesh import, ICP and
    /// sectioning never stall the transport.
    async fn with_dashboard<T, F>(&self, work: F) -> Result<T, ErrorData>
    where
        F: FnOnce(&mut Dashboard) -> T + Send + 'static,
        T: Send + 'static,
    {
        let mut dashboard = Arc::clone(&self.dashboard).lock_owned().await;
        tokio::task::spawn_blocking(move || work(&mut dashboard))
            .await
            .map_err(|err| ErrorData::internal_error(format!("dashboard cycle failed: {err}"), None))
    }
}

#[tool_handler]
impl ServerHandler for RegdashMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Regdash registration dashboard server (tools: roster.read, selection.read, selection.update, view.click, control.set, view.render, dashboard.render)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// Extracted mapping/parsing helpers for MCP tool handlers.
include!("server/helpers.rs");
