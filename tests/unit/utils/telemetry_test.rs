// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use rynn_api::utils::telemetry;

    #[test]
    fn test_telemetry_initialization() {
        telemetry::init_telemetry();
        // Second call must be a no-op
        telemetry::init_telemetry();

        tracing::info!(route = "/api/ytsearch", results = 3, "Structured log line");
        tracing::error!(error = "Test error", "Operation failed");
    }
}
