// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use azure_drive::{SignedUrlOptions, StorageConfig, StorageDriverFactory};
use futures::TryStreamExt;
use object_store::PutPayload;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let account_name = "my_account_name";
    let account_key = "my_account_key";
    let container = "my_container";

    let config = StorageConfig::new(account_name, account_key, container);
    let driver = StorageDriverFactory::from_config(config)?;

    driver
        .put("demo/hello.txt", PutPayload::from("hello from azure-drive"))
        .await?;

    let stat = driver.stat("demo/hello.txt").await?;
    println!("{} is {} bytes", stat.path, stat.size);

    let grant = driver
        .signed_url("demo/hello.txt", SignedUrlOptions::default())
        .await?;
    println!("signed url ({}s): {}", grant.expires_in.as_secs(), grant.url);

    let entries: Vec<_> = driver.flat_list(Some("demo")).try_collect().await?;
    for entry in entries {
        println!("{} ({} bytes, modified {})", entry.path, entry.size, entry.last_modified);
    }

    driver.delete("demo/hello.txt").await?;

    Ok(())
}
