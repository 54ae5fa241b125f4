use colored::*;
use serde_json::Value;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "🏎️ RentXotic Fleet Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = get_base_url()?;
    let client = reqwest::Client::new();

    check_health(&client, &base_url).await?;

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 📊 Ver dashboard");
        println!("2. 🚨 Ver alertas");
        println!("3. ✅ Mark All Ready");
        println!("4. 📄 Exportar tasks a CSV");
        println!("5. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-5): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        match choice.trim() {
            "1" => show_dashboard(&client, &base_url).await?,
            "2" => show_alerts(&client, &base_url).await?,
            "3" => mark_all_ready(&client, &base_url).await?,
            "4" => export_tasks(&client, &base_url).await?,
            "5" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
            }
        }
    }

    Ok(())
}

fn get_base_url() -> Result<String, Box<dyn std::error::Error>> {
    print!("{}", "URL del servicio [http://localhost:3000]: ".bright_yellow());
    io::stdout().flush()?;
    let mut url = String::new();
    io::stdin().read_line(&mut url)?;
    let url = url.trim().trim_end_matches('/');

    Ok(if url.is_empty() {
        "http://localhost:3000".to_string()
    } else {
        url.to_string()
    })
}

async fn check_health(client: &reqwest::Client, base_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let body: Value = client
        .get(format!("{}/health", base_url))
        .send()
        .await?
        .json()
        .await?;

    println!("{}", "✅ Servicio disponible".bright_green());
    println!("   Record store: {}", body["recordStore"]);
    println!("   Hora: {}", body["currentTime"]);
    Ok(())
}

async fn show_dashboard(client: &reqwest::Client, base_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let body: Value = client
        .get(format!("{}/api/dashboard", base_url))
        .send()
        .await?
        .json()
        .await?;

    if body["success"] != true {
        println!("{} {}", "❌ Error:".bright_red(), body);
        return Ok(());
    }

    let stats = &body["data"]["stats"];
    println!();
    println!("{}", "📊 FLOTA".bright_cyan().bold());
    println!("   Total: {}", stats["totalVehicles"]);
    println!("   Available: {}", stats["available"].to_string().bright_green());
    println!("   Rented: {}", stats["rented"].to_string().bright_blue());
    println!("   Maintenance: {}", stats["maintenance"].to_string().bright_yellow());
    println!("   Needs wash: {}", stats["needsWash"]);
    println!("   Low fuel: {}", stats["lowFuel"].to_string().bright_red());
    println!("   Urgent tasks: {}", stats["urgentTasks"]);
    println!("   Utilización: {}%", stats["utilization"]);
    Ok(())
}

async fn show_alerts(client: &reqwest::Client, base_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let body: Value = client
        .get(format!("{}/api/dashboard/alerts", base_url))
        .send()
        .await?
        .json()
        .await?;

    let alerts = body["data"].as_array().cloned().unwrap_or_default();
    if alerts.is_empty() {
        println!("{}", "✅ Sin alertas".bright_green());
        return Ok(());
    }

    for alert in alerts {
        let message = alert["message"].as_str().unwrap_or_default();
        if alert["severity"] == "danger" {
            println!("{}", message.bright_red());
        } else {
            println!("{}", message.bright_yellow());
        }
    }
    Ok(())
}

async fn mark_all_ready(client: &reqwest::Client, base_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let body: Value = client
        .post(format!("{}/api/vehicles/ready-all", base_url))
        .send()
        .await?
        .json()
        .await?;

    let message = body["message"].as_str().unwrap_or_default();
    if body["success"] == true {
        println!("{}", message.bright_green());
    } else {
        println!("{}", message.bright_red());
        if let Some(failed) = body["data"]["failed"].as_array() {
            for failure in failed {
                println!("   ❌ {}: {}", failure["vehicleName"], failure["error"]);
            }
        }
    }
    Ok(())
}

async fn export_tasks(client: &reqwest::Client, base_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let response = client
        .get(format!("{}/api/tasks/export", base_url))
        .send()
        .await?;

    let disposition = response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let Some(disposition) = disposition else {
        let body: Value = response.json().await?;
        println!("{}", body["message"].as_str().unwrap_or_default().bright_yellow());
        return Ok(());
    };

    let file_name = disposition
        .split("filename=")
        .nth(1)
        .map(|name| name.trim_matches('"').to_string())
        .unwrap_or_else(|| "tasks.csv".to_string());

    let content = response.text().await?;
    std::fs::write(&file_name, &content)?;
    println!("{} {} ({} líneas)", "💾 Guardado:".bright_green(), file_name, content.lines().count());
    Ok(())
}
