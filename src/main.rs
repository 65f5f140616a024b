use storage_invoice::{api, AppConfig};
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载配置
    let config = AppConfig::load()?;

    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_max_level(config.log_level())
        .init();

    info!("Starting server with config: {:?}", config);

    let app = api::router();

    // 启动服务器
    let addr = config.addr();
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/invoices/calculate    - 单条计费");
    info!("  POST /api/invoices/batch        - 批量计费 + 汇总");
    info!("  POST /api/invoices/export/csv   - CSV 导出");
    info!("  POST /api/invoices/export/text  - 纯文本发票");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
