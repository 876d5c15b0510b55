use common::utils::logging::{init_logging, LogFormat};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use uuid::Uuid;

fn init_logging_from(cfg: &configs::AppConfig) {
    let format = cfg.log.format.parse::<LogFormat>().unwrap_or_else(|e| {
        eprintln!("{e}; falling back to compact logs");
        LogFormat::Compact
    });
    init_logging(format);
    info!(service = "server", event = "logger_init", ?format, "tracing subscriber initialized");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(service = "server", event = "signal_error", error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(service = "server", event = "shutdown_signal", "received Ctrl+C, shutting down");
}

fn main() -> std::process::ExitCode {
    // 提前加载 .env，使得 RUST_LOG / DATABASE_URL 等环境变量生效
    dotenv().ok();

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };
    init_logging_from(&cfg);

    // 基础服务上下文（不含敏感信息）
    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // Panic 钩子：捕获异常并输出错误日志，便于排查问题
    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "server",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "server service starting"
    );

    rt.block_on(async move {
        match server::run(cfg, shutdown_signal()).await {
            Ok(()) => {
                info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "server", event = "run_failed", error = %e, "server::run returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
